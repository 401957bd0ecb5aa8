//! Storage key validation.
//!
//! Keys name a storage slot. The filesystem backend turns a key into a file name, so
//! keys are restricted to a conservative character set:
//! - ASCII alphanumeric characters, underscores (`_`), hyphens (`-`) and dots (`.`)
//! - Cannot start with a dot
//! - At most [`MAX_KEY_LEN`] characters

pub const MAX_KEY_LEN: usize = 64;

/// Validates a storage key.
///
/// # Examples
/// ```
/// use shelf::store::key::validate_key;
///
/// assert!(validate_key("products").is_ok());
/// assert!(validate_key("products.v2").is_ok());
/// assert!(validate_key("my_store-1").is_ok());
///
/// assert!(validate_key("").is_err());
/// assert!(validate_key(".hidden").is_err());
/// assert!(validate_key("../escape").is_err());
/// assert!(validate_key("a/b").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<(), KeyValidationError> {
    let Some(first) = key.chars().next() else {
        return Err(KeyValidationError::Empty);
    };

    if first == '.' {
        return Err(KeyValidationError::LeadingDot);
    }

    let len = key.chars().count();
    if len > MAX_KEY_LEN {
        return Err(KeyValidationError::TooLong(len));
    }

    if let Some(ch) = key.chars().find(|ch| !is_valid_key_char(*ch)) {
        return Err(KeyValidationError::InvalidCharacter(ch));
    }

    Ok(())
}

fn is_valid_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch == '.'
}

/// Error type for storage key validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValidationError {
    /// Key is empty
    Empty,
    /// Key starts with a dot
    LeadingDot,
    /// Key is longer than [`MAX_KEY_LEN`]
    TooLong(usize),
    /// Key contains a character outside the allowed set
    InvalidCharacter(char),
}

impl std::fmt::Display for KeyValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyValidationError::Empty => write!(f, "key cannot be empty"),
            KeyValidationError::LeadingDot => write!(f, "key cannot start with a dot"),
            KeyValidationError::TooLong(len) => {
                write!(f, "key is {} characters long (max {})", len, MAX_KEY_LEN)
            }
            KeyValidationError::InvalidCharacter(ch) => write!(
                f,
                "key contains invalid character '{}' (only alphanumeric, underscore, hyphen and dot allowed)",
                ch
            ),
        }
    }
}

impl std::error::Error for KeyValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        assert!(validate_key("products").is_ok());
        assert!(validate_key("Products2024").is_ok());
        assert!(validate_key("shop.products").is_ok());
        assert!(validate_key("a").is_ok());
        assert!(validate_key(&"k".repeat(MAX_KEY_LEN)).is_ok());
    }

    #[test]
    fn test_invalid_empty() {
        assert_eq!(validate_key(""), Err(KeyValidationError::Empty));
    }

    #[test]
    fn test_invalid_leading_dot() {
        assert_eq!(validate_key(".data"), Err(KeyValidationError::LeadingDot));
        assert_eq!(validate_key(".."), Err(KeyValidationError::LeadingDot));
    }

    #[test]
    fn test_invalid_too_long() {
        let key = "k".repeat(MAX_KEY_LEN + 1);
        assert_eq!(
            validate_key(&key),
            Err(KeyValidationError::TooLong(MAX_KEY_LEN + 1))
        );
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            validate_key("a/b"),
            Err(KeyValidationError::InvalidCharacter('/'))
        );
        assert_eq!(
            validate_key("a\\b"),
            Err(KeyValidationError::InvalidCharacter('\\'))
        );
        assert_eq!(
            validate_key("my key"),
            Err(KeyValidationError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(KeyValidationError::Empty.to_string(), "key cannot be empty");
        assert_eq!(
            KeyValidationError::LeadingDot.to_string(),
            "key cannot start with a dot"
        );
        assert_eq!(
            KeyValidationError::TooLong(70).to_string(),
            "key is 70 characters long (max 64)"
        );
    }
}
