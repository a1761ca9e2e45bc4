//! Save name validation. Save names become file names, so they are held to a
//! conservative character set and checked against platform-reserved names.

use std::collections::HashSet;

pub const MAX_SAVE_NAME_LEN: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SaveNameError {
    #[error("save name is empty")]
    Empty,

    #[error("save name is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("save name contains invalid characters: {chars} (use letters, digits, - and _)")]
    InvalidCharacters { chars: String },

    #[error("save name '{0}' is reserved")]
    Reserved(String),
}

fn reserved_names() -> HashSet<&'static str> {
    [
        "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
        "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
    ]
    .iter()
    .copied()
    .collect()
}

/// Trim and check a save name; returns the trimmed name.
pub fn validate_save_name(name: &str) -> Result<String, SaveNameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SaveNameError::Empty);
    }
    if trimmed.chars().count() > MAX_SAVE_NAME_LEN {
        return Err(SaveNameError::TooLong {
            max: MAX_SAVE_NAME_LEN,
        });
    }
    let bad: String = trimmed
        .chars()
        .filter(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        .collect();
    if !bad.is_empty() {
        return Err(SaveNameError::InvalidCharacters { chars: bad });
    }
    if reserved_names().contains(trimmed.to_ascii_lowercase().as_str()) {
        return Err(SaveNameError::Reserved(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}
