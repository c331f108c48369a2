use crate::error::ConfigError;
use serde::Deserialize;

///
/// QueryConfig
///
/// Limits and switches shared by the parsers, the statement builder and
/// the comparator builder. Every field has a default, so a partial TOML
/// table is valid.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Maximum number of statements in one filter.
    pub max_statements: usize,

    /// Maximum number of segments in one dotted property path.
    pub max_path_depth: usize,

    /// Maximum number of elements in one bracketed list literal.
    pub max_list_len: usize,

    /// Where absent values sort relative to present ones.
    pub null_ordering: NullOrdering,

    /// Dump compiled expressions at debug level.
    pub debug: bool,
}

impl QueryConfig {
    pub const DEFAULT_MAX_STATEMENTS: usize = 32;
    pub const DEFAULT_MAX_PATH_DEPTH: usize = 8;
    pub const DEFAULT_MAX_LIST_LEN: usize = 256;

    /// Parse a TOML document and validate it.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;

        Ok(config)
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_statements == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_statements",
            });
        }
        if self.max_path_depth == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_path_depth",
            });
        }
        if self.max_list_len == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_list_len",
            });
        }

        Ok(())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_statements: Self::DEFAULT_MAX_STATEMENTS,
            max_path_depth: Self::DEFAULT_MAX_PATH_DEPTH,
            max_list_len: Self::DEFAULT_MAX_LIST_LEN,
            null_ordering: NullOrdering::default(),
            debug: false,
        }
    }
}

///
/// NullOrdering
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NullOrdering {
    #[default]
    First,
    Last,
}
