use crate::runtime::contract::{DEFAULT_TABLE_NAME, DEFAULT_YEAR_INDEX};
use crate::runtime::pagination::PageLimit;

pub const TABLE_NAME_VAR: &str = "MOVIES_TABLE_NAME";
pub const YEAR_INDEX_VAR: &str = "MOVIES_YEAR_INDEX";
pub const MAX_PAGES_VAR: &str = "MOVIES_MAX_PAGES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub table_name: String,
    pub year_index: String,
    pub page_limit: PageLimit,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            year_index: DEFAULT_YEAR_INDEX.to_string(),
            page_limit: PageLimit::Unbounded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{variable} must be a positive integer, got '{value}'")]
    InvalidPageLimit {
        variable: &'static str,
        value: String,
    },
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Unset or blank
    /// variables fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let page_limit = match read(MAX_PAGES_VAR) {
            None => PageLimit::Unbounded,
            Some(value) => match value.parse::<usize>() {
                Ok(limit) if limit > 0 => PageLimit::AtMost(limit),
                _ => {
                    return Err(ConfigError::InvalidPageLimit {
                        variable: MAX_PAGES_VAR,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            table_name: read(TABLE_NAME_VAR).unwrap_or(defaults.table_name),
            year_index: read(YEAR_INDEX_VAR).unwrap_or(defaults.year_index),
            page_limit,
        })
    }
}
