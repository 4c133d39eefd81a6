//! Post idea status values.
//!
//! Ideas start `active`, become `used` when a post consumes them, and are
//! archived manually.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum number of tags on a single idea.
pub const MAX_TAGS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    Active,
    Used,
    Archived,
}

impl IdeaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Used => "used",
            Self::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "active" => Ok(Self::Active),
            "used" => Ok(Self::Used),
            "archived" => Ok(Self::Archived),
            other => Err(CoreError::Validation(format!(
                "Unknown idea status: {other}"
            ))),
        }
    }
}

/// Validate a tag list (at most [`MAX_TAGS`] entries).
pub fn validate_tags(tags: &[String]) -> Result<(), CoreError> {
    if tags.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "Maximum {MAX_TAGS} tags allowed"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_statuses() {
        assert_eq!(IdeaStatus::parse("active").unwrap(), IdeaStatus::Active);
        assert_eq!(IdeaStatus::parse("used").unwrap(), IdeaStatus::Used);
        assert_eq!(IdeaStatus::parse("archived").unwrap(), IdeaStatus::Archived);
        assert!(IdeaStatus::parse("draft").is_err());
    }

    #[test]
    fn tag_limit_is_ten() {
        let ten: Vec<String> = (0..10).map(|i| format!("tag{i}")).collect();
        assert!(validate_tags(&ten).is_ok());
        let eleven: Vec<String> = (0..11).map(|i| format!("tag{i}")).collect();
        assert!(validate_tags(&eleven).is_err());
    }
}
