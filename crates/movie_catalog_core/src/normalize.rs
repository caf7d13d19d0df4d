//! Conversion of store records into plain JSON values.
//!
//! Two renderings exist. [`Rendering::Truncating`] turns numbers into
//! integers (truncated toward zero), turns sets into arrays and rejects
//! binary data. [`Rendering::Exact`] keeps every number at its stored value
//! and writes binary data as base64 strings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Number, Value};

use crate::record::{MovieRecord, RecordValue};

// Anything longer cannot fit in an i64 once leading zeros are gone.
const MAX_INTEGER_DIGITS: usize = 19;

/// How store numbers and binary data are turned into JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    Truncating,
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("attribute '{attribute}' holds a malformed number: {value}")]
    MalformedNumber { attribute: String, value: String },
    #[error("attribute '{attribute}' holds a number outside the integer range: {value}")]
    NumberOutOfRange { attribute: String, value: String },
    #[error("attribute '{attribute}' holds {kind} data which has no JSON representation")]
    UnsupportedBinary {
        attribute: String,
        kind: &'static str,
    },
}

pub fn normalize_records(
    records: &[MovieRecord],
    rendering: Rendering,
) -> Result<Value, NormalizeError> {
    records
        .iter()
        .map(|record| normalize_record(record, rendering))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

pub fn normalize_record(
    record: &MovieRecord,
    rendering: Rendering,
) -> Result<Value, NormalizeError> {
    let mut object = Map::new();
    for (name, value) in record {
        object.insert(name.clone(), normalize_value(name, value, rendering)?);
    }
    Ok(Value::Object(object))
}

fn normalize_value(
    attribute: &str,
    value: &RecordValue,
    rendering: Rendering,
) -> Result<Value, NormalizeError> {
    match value {
        RecordValue::Null => Ok(Value::Null),
        RecordValue::Bool(flag) => Ok(Value::Bool(*flag)),
        RecordValue::String(text) => Ok(Value::String(text.clone())),
        RecordValue::Number(text) => render_number(attribute, text, rendering),
        RecordValue::StringSet(items) => Ok(Value::Array(
            items.iter().cloned().map(Value::String).collect(),
        )),
        RecordValue::NumberSet(items) => items
            .iter()
            .map(|text| render_number(attribute, text, rendering))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        RecordValue::List(items) => items
            .iter()
            .map(|item| normalize_value(attribute, item, rendering))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        RecordValue::Map(entries) => {
            let mut object = Map::new();
            for (name, nested) in entries {
                let path = format!("{attribute}.{name}");
                object.insert(name.clone(), normalize_value(&path, nested, rendering)?);
            }
            Ok(Value::Object(object))
        }
        RecordValue::Binary(bytes) if rendering == Rendering::Exact => {
            Ok(Value::String(STANDARD.encode(bytes)))
        }
        RecordValue::BinarySet(items) if rendering == Rendering::Exact => Ok(Value::Array(
            items
                .iter()
                .map(|bytes| Value::String(STANDARD.encode(bytes)))
                .collect(),
        )),
        RecordValue::Binary(_) | RecordValue::BinarySet(_) => {
            Err(NormalizeError::UnsupportedBinary {
                attribute: attribute.to_string(),
                kind: value.type_name(),
            })
        }
    }
}

fn render_number(
    attribute: &str,
    text: &str,
    rendering: Rendering,
) -> Result<Value, NormalizeError> {
    match rendering {
        Rendering::Truncating => truncate_to_integer(attribute, text).map(Value::from),
        Rendering::Exact => exact_number(attribute, text),
    }
}

/// Renders a stored number without changing its value.
///
/// The JSON number form is used when it denotes the same decimal as the
/// stored text. Otherwise (more precision than a double carries, or a
/// magnitude a double cannot hold) the stored text is emitted as a string.
fn exact_number(attribute: &str, text: &str) -> Result<Value, NormalizeError> {
    let trimmed = text.trim();
    let stored = canonical_decimal(trimmed).ok_or_else(|| NormalizeError::MalformedNumber {
        attribute: attribute.to_string(),
        value: text.to_string(),
    })?;

    let as_json = trimmed.parse::<Number>().ok().filter(|number| {
        serde_json::to_string(number)
            .ok()
            .and_then(|written| canonical_decimal(&written))
            .as_ref()
            == Some(&stored)
    });
    Ok(match as_json {
        Some(number) => Value::Number(number),
        None => Value::String(trimmed.to_string()),
    })
}

struct DecimalParts<'a> {
    negative: bool,
    whole: &'a str,
    fraction: &'a str,
    exponent: i64,
}

impl DecimalParts<'_> {
    fn digits(&self) -> String {
        self.whole.chars().chain(self.fraction.chars()).collect()
    }

    /// Position of the decimal point within `digits()`, if representable.
    fn point(&self) -> Option<i64> {
        i64::try_from(self.whole.len())
            .ok()
            .and_then(|len| len.checked_add(self.exponent))
    }
}

fn split_decimal(text: &str) -> Option<DecimalParts<'_>> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], unsigned[at + 1..].parse::<i64>().ok()?),
        None => (unsigned, 0),
    };

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }

    Some(DecimalParts {
        negative,
        whole,
        fraction,
        exponent,
    })
}

/// Sign, significant digits and the power of ten of the first digit, with
/// zero always represented as `(false, "", 0)`.
fn canonical_decimal(text: &str) -> Option<(bool, String, i128)> {
    let parts = split_decimal(text)?;
    let digits = parts.digits();
    let leading = digits.len() - digits.trim_start_matches('0').len();
    let significant = digits[leading..].trim_end_matches('0');
    if significant.is_empty() {
        return Some((false, String::new(), 0));
    }
    let magnitude = parts.whole.len() as i128 + i128::from(parts.exponent) - leading as i128;
    Some((parts.negative, significant.to_string(), magnitude))
}

/// Truncates a decimal string such as `8.75`, `-3.9` or `1.5E+3` toward
/// zero without going through floating point.
pub fn truncate_to_integer(attribute: &str, text: &str) -> Result<i64, NormalizeError> {
    let malformed = || NormalizeError::MalformedNumber {
        attribute: attribute.to_string(),
        value: text.to_string(),
    };
    let out_of_range = || NormalizeError::NumberOutOfRange {
        attribute: attribute.to_string(),
        value: text.to_string(),
    };

    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }

    let parts = split_decimal(trimmed).ok_or_else(malformed)?;
    let digits = parts.digits();
    let point = parts.point().ok_or_else(out_of_range)?;
    if point <= 0 {
        return Ok(0);
    }

    let point = usize::try_from(point).map_err(|_| out_of_range())?;
    let kept = if point <= digits.len() {
        digits[..point].to_string()
    } else {
        if point > MAX_INTEGER_DIGITS + digits.len() {
            return Err(out_of_range());
        }
        format!("{digits}{}", "0".repeat(point - digits.len()))
    };

    let significant = kept.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }
    if significant.len() > MAX_INTEGER_DIGITS {
        return Err(out_of_range());
    }

    let signed = if parts.negative {
        format!("-{significant}")
    } else {
        significant.to_string()
    };
    signed.parse::<i64>().map_err(|_| out_of_range())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    fn truncate(text: &str) -> Result<i64, NormalizeError> {
        truncate_to_integer("rating", text)
    }

    #[test]
    fn truncates_fixed_point_values_toward_zero() {
        assert_eq!(truncate("8.0"), Ok(8));
        assert_eq!(truncate("8.7"), Ok(8));
        assert_eq!(truncate("-3.9"), Ok(-3));
        assert_eq!(truncate("0.25"), Ok(0));
        assert_eq!(truncate("-0.5"), Ok(0));
        assert_eq!(truncate(".5"), Ok(0));
        assert_eq!(truncate("1994"), Ok(1994));
    }

    #[test]
    fn applies_exponents_exactly() {
        assert_eq!(truncate("1E+3"), Ok(1000));
        assert_eq!(truncate("1.5e3"), Ok(1500));
        assert_eq!(truncate("12345e-2"), Ok(123));
        assert_eq!(truncate("7E-10"), Ok(0));
        assert_eq!(truncate("9.223372036854775807E18"), Ok(i64::MAX));
    }

    #[test]
    fn rejects_numbers_that_do_not_fit() {
        assert!(matches!(
            truncate("1E+125"),
            Err(NormalizeError::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            truncate("99999999999999999999"),
            Err(NormalizeError::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            truncate("1E9223372036854775807"),
            Err(NormalizeError::NumberOutOfRange { .. })
        ));
        assert_eq!(truncate("1E-9223372036854775808"), Ok(0));
    }

    #[test]
    fn rejects_malformed_numbers() {
        for text in ["", ".", "abc", "1.2.3", "1e", "--4"] {
            assert!(
                matches!(truncate(text), Err(NormalizeError::MalformedNumber { .. })),
                "{text} should be malformed"
            );
        }
    }

    #[test]
    fn normalizes_sets_and_nested_values() {
        let record: MovieRecord = BTreeMap::from([
            ("title".to_string(), RecordValue::string("Pulp Fiction")),
            ("year".to_string(), RecordValue::number(1994)),
            ("rating".to_string(), RecordValue::Number("8.9".to_string())),
            (
                "genres".to_string(),
                RecordValue::StringSet(vec!["Crime".to_string(), "Drama".to_string()]),
            ),
            (
                "ranks".to_string(),
                RecordValue::NumberSet(vec!["3.5".to_string(), "12".to_string()]),
            ),
            (
                "info".to_string(),
                RecordValue::Map(BTreeMap::from([
                    ("running_time".to_string(), RecordValue::number(154)),
                    (
                        "actors".to_string(),
                        RecordValue::List(vec![
                            RecordValue::string("John Travolta"),
                            RecordValue::Null,
                        ]),
                    ),
                    ("released".to_string(), RecordValue::Bool(true)),
                ])),
            ),
        ]);

        let normalized =
            normalize_record(&record, Rendering::Truncating).expect("record should normalize");
        assert_eq!(
            normalized,
            json!({
                "title": "Pulp Fiction",
                "year": 1994,
                "rating": 8,
                "genres": ["Crime", "Drama"],
                "ranks": [3, 12],
                "info": {
                    "running_time": 154,
                    "actors": ["John Travolta", null],
                    "released": true
                }
            })
        );
    }

    #[test]
    fn binary_attributes_fail_with_their_path() {
        let record: MovieRecord = BTreeMap::from([(
            "info".to_string(),
            RecordValue::Map(BTreeMap::from([(
                "poster".to_string(),
                RecordValue::Binary(vec![0xff, 0xd8]),
            )])),
        )]);

        let error = normalize_record(&record, Rendering::Truncating)
            .expect_err("binary should be rejected");
        assert_eq!(
            error,
            NormalizeError::UnsupportedBinary {
                attribute: "info.poster".to_string(),
                kind: "binary",
            }
        );
    }

    #[test]
    fn empty_record_list_normalizes_to_empty_array() {
        assert_eq!(normalize_records(&[], Rendering::Truncating), Ok(json!([])));
    }

    fn exact(text: &str) -> Result<Value, NormalizeError> {
        exact_number("rating", text)
    }

    #[test]
    fn exact_rendering_keeps_stored_values() {
        assert_eq!(exact("8.9"), Ok(json!(8.9)));
        assert_eq!(exact("1994"), Ok(json!(1994)));
        assert_eq!(exact("-3.25"), Ok(json!(-3.25)));
        assert_eq!(exact("1E+3"), Ok(json!(1000.0)));
        assert_eq!(exact("18446744073709551615"), Ok(json!(u64::MAX)));
    }

    #[test]
    fn exact_rendering_falls_back_to_text_when_a_double_would_round() {
        assert_eq!(
            exact("3.14159265358979323846264338327950288"),
            Ok(json!("3.14159265358979323846264338327950288"))
        );
        assert_eq!(exact("1E+400"), Ok(json!("1E+400")));
        assert!(matches!(
            exact("12abc"),
            Err(NormalizeError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn exact_rendering_encodes_binary_as_base64() {
        let record: MovieRecord = BTreeMap::from([
            ("poster".to_string(), RecordValue::Binary(vec![1, 2, 3])),
            (
                "stills".to_string(),
                RecordValue::BinarySet(vec![b"hi".to_vec(), vec![0xff]]),
            ),
            ("rating".to_string(), RecordValue::Number("8.9".to_string())),
            (
                "ranks".to_string(),
                RecordValue::NumberSet(vec!["3.5".to_string(), "12".to_string()]),
            ),
        ]);

        let rendered = normalize_record(&record, Rendering::Exact).expect("record renders");
        assert_eq!(
            rendered,
            json!({
                "poster": "AQID",
                "stills": ["aGk=", "/w=="],
                "rating": 8.9,
                "ranks": [3.5, 12]
            })
        );
    }
}
