//! Validation helpers for DTOs.

use validator::ValidationError;

const MAX_PLAYER_NAME_LEN: usize = 50;

/// Validates that a player name starts with a letter and contains only ASCII
/// letters and spaces, with a sensible length bound.
///
/// # Examples
///
/// ```ignore
/// validate_player_name("Ana")        // Ok
/// validate_player_name("Ana Maria") // Ok
/// validate_player_name("4na")       // Err - starts with a digit
/// validate_player_name("")          // Err - empty
/// ```
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() || trimmed.len() > MAX_PLAYER_NAME_LEN {
        let mut err = ValidationError::new("player_name_length");
        err.message = Some(
            format!(
                "Player name must be between 1 and {MAX_PLAYER_NAME_LEN} characters (got {})",
                trimmed.len()
            )
            .into(),
        );
        return Err(err);
    }

    let mut chars = trimmed.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_with_letter || !chars.all(|c| c.is_ascii_alphabetic() || c == ' ') {
        let mut err = ValidationError::new("player_name_format");
        err.message =
            Some("Player name must start with a letter and contain only letters and spaces".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_player_name_valid() {
        assert!(validate_player_name("Ana").is_ok());
        assert!(validate_player_name("Ana Maria").is_ok());
        assert!(validate_player_name("z").is_ok());
        assert!(validate_player_name("  Ana  ").is_ok()); // trimmed before checks
    }

    #[test]
    fn test_validate_player_name_invalid_length() {
        assert!(validate_player_name("").is_err());
        assert!(validate_player_name("   ").is_err());
        assert!(validate_player_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_player_name_invalid_format() {
        assert!(validate_player_name("4na").is_err()); // starts with digit
        assert!(validate_player_name("Ana!").is_err()); // punctuation
        assert!(validate_player_name("Ana_Maria").is_err()); // underscore
        assert!(validate_player_name(" 1").is_err());
    }
}
