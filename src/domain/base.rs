use crate::SweepError;

/// Longest label DNS allows
pub const MAX_BASE_LEN: usize = 63;

/// Returns true if `c` may appear in a base name
///
/// Accepts ASCII letters and digits, the hyphen, and the accented Latin
/// letters of U+00C0..=U+024F (æ, ø, å, é, ü, ...). The two arithmetic signs
/// in that block are excluded.
pub fn is_valid_base_char(c: char) -> bool {
    if c.is_ascii_alphanumeric() || c == '-' {
        return true;
    }
    matches!(c, '\u{00C0}'..='\u{024F}') && c != '\u{00D7}' && c != '\u{00F7}'
}

/// Validates a base name and returns it trimmed
///
/// # Examples
///
/// ```
/// use domain_sweep::domain::validate_base;
///
/// assert_eq!(validate_base("  nrk ").unwrap(), "nrk");
/// assert!(validate_base("blåbær").is_ok());
/// assert!(validate_base("nrk.no").is_err());
/// ```
pub fn validate_base(base: &str) -> Result<&str, SweepError> {
    let trimmed = base.trim();

    let invalid = |reason: &str| SweepError::InvalidBase {
        base: base.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("base domain cannot be empty"));
    }

    if trimmed.chars().count() > MAX_BASE_LEN {
        return Err(invalid("base domain is longer than 63 characters"));
    }

    if !trimmed.chars().all(is_valid_base_char) {
        return Err(invalid(
            "only letters, digits, hyphens and accented letters are allowed",
        ));
    }

    if trimmed.starts_with('-') || trimmed.ends_with('-') {
        return Err(invalid("base domain cannot start or end with '-'"));
    }

    Ok(trimmed)
}
