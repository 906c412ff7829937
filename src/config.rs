use crate::default_struct;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a non-zero integer id, got {value:?}")]
    InvalidId { key: &'static str, value: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

const DEFAULT_SESSION_CATEGORY_ID: u64 = 1277016557993857075;
const DEFAULT_SESSION_ROLE_ID: u64 = 1276165715812028416;

default_struct! {
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: String = "data".to_string(),
    /// Category new debate session channels are created under.
    pub session_category_id: u64 = DEFAULT_SESSION_CATEGORY_ID,
    /// Role that can always speak in debate session channels.
    pub session_role_id: u64 = DEFAULT_SESSION_ROLE_ID,
}
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(dir) = lookup("DEBATE_DATA_DIR") {
            if dir.trim().is_empty() {
                return Err(ConfigError::Empty("DEBATE_DATA_DIR"));
            }
            settings.data_dir = dir;
        }
        if let Some(id) = parse_id(&lookup, "DEBATE_SESSION_CATEGORY_ID")? {
            settings.session_category_id = id;
        }
        if let Some(id) = parse_id(&lookup, "DEBATE_SESSION_ROLE_ID")? {
            settings.session_role_id = id;
        }

        Ok(settings)
    }
}

fn parse_id(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    match value.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(Some(id)),
        _ => Err(ConfigError::InvalidId { key, value }),
    }
}
