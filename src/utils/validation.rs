use crate::utils::error::{LayoutError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LayoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LayoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LayoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_letter(field_name: &str, value: char) -> Result<()> {
    if !value.is_ascii_uppercase() {
        return Err(LayoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a single uppercase letter A-Z".to_string(),
        });
    }
    Ok(())
}

pub fn validate_letter_range(start: char, end: char) -> Result<()> {
    validate_letter("bins.start", start)?;
    validate_letter("bins.end", end)?;
    if start > end {
        return Err(LayoutError::InvalidConfigValueError {
            field: "bins.start".to_string(),
            value: start.to_string(),
            reason: format!("Start letter must not come after end letter '{}'", end),
        });
    }
    Ok(())
}

/// Parses a one-letter string such as "A" from a config file.
pub fn parse_letter(field_name: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            validate_letter(field_name, c)?;
            Ok(c)
        }
        _ => Err(LayoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a single uppercase letter A-Z".to_string(),
        }),
    }
}
