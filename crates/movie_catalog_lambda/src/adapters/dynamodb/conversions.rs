//! Conversions between DynamoDB attribute maps and `MovieRecord`.

use std::collections::{BTreeMap, HashMap};

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::runtime::error::StoreError;
use crate::runtime::record::{ContinuationToken, MovieRecord, RecordValue};

pub type Item = HashMap<String, AttributeValue>;

pub fn item_to_record(item: Item) -> Result<MovieRecord, StoreError> {
    item.into_iter()
        .map(|(name, attribute)| attribute_to_value(&name, attribute).map(|value| (name, value)))
        .collect()
}

fn attribute_to_value(path: &str, attribute: AttributeValue) -> Result<RecordValue, StoreError> {
    let value = match attribute {
        AttributeValue::Null(_) => RecordValue::Null,
        AttributeValue::Bool(flag) => RecordValue::Bool(flag),
        AttributeValue::N(number) => RecordValue::Number(number),
        AttributeValue::S(text) => RecordValue::String(text),
        AttributeValue::B(blob) => RecordValue::Binary(blob.into_inner()),
        AttributeValue::Ss(items) => RecordValue::StringSet(items),
        AttributeValue::Ns(items) => RecordValue::NumberSet(items),
        AttributeValue::Bs(items) => {
            RecordValue::BinarySet(items.into_iter().map(Blob::into_inner).collect())
        }
        AttributeValue::L(items) => RecordValue::List(
            items
                .into_iter()
                .map(|item| attribute_to_value(path, item))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(entries) => {
            let mut nested = BTreeMap::new();
            for (name, attribute) in entries {
                let value = attribute_to_value(&format!("{path}.{name}"), attribute)?;
                nested.insert(name, value);
            }
            RecordValue::Map(nested)
        }
        _ => return Err(StoreError::UnsupportedAttribute(path.to_string())),
    };
    Ok(value)
}

fn value_to_attribute(value: &RecordValue) -> AttributeValue {
    match value {
        RecordValue::Null => AttributeValue::Null(true),
        RecordValue::Bool(flag) => AttributeValue::Bool(*flag),
        RecordValue::Number(number) => AttributeValue::N(number.clone()),
        RecordValue::String(text) => AttributeValue::S(text.clone()),
        RecordValue::Binary(bytes) => AttributeValue::B(Blob::new(bytes.clone())),
        RecordValue::StringSet(items) => AttributeValue::Ss(items.clone()),
        RecordValue::NumberSet(items) => AttributeValue::Ns(items.clone()),
        RecordValue::BinarySet(items) => {
            AttributeValue::Bs(items.iter().cloned().map(Blob::new).collect())
        }
        RecordValue::List(items) => {
            AttributeValue::L(items.iter().map(value_to_attribute).collect())
        }
        RecordValue::Map(entries) => AttributeValue::M(
            entries
                .iter()
                .map(|(name, value)| (name.clone(), value_to_attribute(value)))
                .collect(),
        ),
    }
}

pub fn last_evaluated_key_to_token(
    key: Option<Item>,
) -> Result<Option<ContinuationToken>, StoreError> {
    key.map(|key| item_to_record(key).map(ContinuationToken::new))
        .transpose()
}

/// Rebuilds an exclusive start key. Key attributes can only be strings,
/// numbers or binary.
pub fn token_to_exclusive_start_key(token: &ContinuationToken) -> Result<Item, StoreError> {
    token
        .key()
        .iter()
        .map(|(name, value)| match value {
            RecordValue::String(_) | RecordValue::Number(_) | RecordValue::Binary(_) => {
                Ok((name.clone(), value_to_attribute(value)))
            }
            other => Err(StoreError::InvalidContinuationToken(format!(
                "key attribute '{name}' is a {}",
                other.type_name()
            ))),
        })
        .collect()
}
