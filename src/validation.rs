//! Form field validation shared by the record dialogs.

use crate::error::{AppError, Result};

/// Trimmed value of a required field.
pub fn required(label: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{label} is required")));
    }
    Ok(value.to_string())
}

/// Parse a decimal amount; thousands separators are accepted.
pub fn decimal(label: &str, value: &str) -> Result<f64> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(AppError::validation(format!("{label} is required")));
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::validation(format!("{label} must be a number")))
}

/// Parse a decimal amount that may not be negative.
pub fn non_negative_decimal(label: &str, value: &str) -> Result<f64> {
    let amount = decimal(label, value)?;
    if amount < 0.0 {
        return Err(AppError::validation(format!("{label} cannot be negative")));
    }
    Ok(amount)
}

/// Parse a whole number that may not be negative.
pub fn count(label: &str, value: &str) -> Result<i64> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{label} is required")));
    }
    match value.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        Ok(_) => Err(AppError::validation(format!("{label} cannot be negative"))),
        Err(_) => Err(AppError::validation(format!("{label} must be a whole number"))),
    }
}

/// Basic shape check: `local@domain.tld`, no whitespace.
pub fn email(value: &str) -> Result<String> {
    let value = required("Email", value)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::validation("Email address is not valid"));
    }
    Ok(value)
}

/// A password and its confirmation must match.
pub fn passwords_match(password: &str, confirmation: &str) -> Result<()> {
    if password != confirmation {
        return Err(AppError::validation("Passwords do not match"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("Name", "  Acme ").unwrap(), "Acme");
        let err = required("Name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_decimal() {
        assert_eq!(decimal("Amount", "1,250.50").unwrap(), 1250.5);
        assert_eq!(decimal("Amount", "-3").unwrap(), -3.0);
        assert!(decimal("Amount", "abc").is_err());
        assert!(decimal("Amount", "").is_err());
        assert!(decimal("Amount", "inf").is_err());
    }

    #[test]
    fn test_non_negative_decimal() {
        assert!(non_negative_decimal("Price", "0").is_ok());
        assert!(non_negative_decimal("Price", "-0.01").is_err());
    }

    #[test]
    fn test_count() {
        assert_eq!(count("Quantity", " 12 ").unwrap(), 12);
        assert!(count("Quantity", "-1").is_err());
        assert!(count("Quantity", "1.5").is_err());
    }

    #[test]
    fn test_email() {
        assert!(email("ana.costa@example.com").is_ok());
        assert!(email("ana.costa@example").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("ana costa@example.com").is_err());
        assert!(email("ana@@example.com").is_err());
        assert!(email("ana@example.com.").is_err());
    }

    #[test]
    fn test_passwords_match() {
        assert!(passwords_match("s3cret", "s3cret").is_ok());
        assert!(passwords_match("s3cret", "secret").is_err());
    }
}
