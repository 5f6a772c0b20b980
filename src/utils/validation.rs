use crate::utils::error::{RentalError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RentalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RentalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(RentalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Must be a plain file name inside the data directory".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RentalError::validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RentalError::validation(format!(
            "{} must be a non-negative number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RentalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.data_dir", "./database").is_ok());
        assert!(validate_path("storage.data_dir", "").is_err());
        assert!(validate_path("storage.data_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("storage.tenants_file", "tenants.csv").is_ok());
        assert!(validate_file_name("storage.tenants_file", "../tenants.csv").is_err());
        assert!(validate_file_name("storage.tenants_file", "..").is_err());
    }

    #[test]
    fn test_validate_non_empty_and_numbers() {
        assert!(validate_non_empty_string("name", "Sunrise Flats").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
        assert!(validate_non_negative("baseRent", 0.0).is_ok());
        assert!(validate_non_negative("baseRent", -1.0).is_err());
        assert!(validate_non_negative("baseRent", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("dashboard.recent_limit", 5, 1, 100).is_ok());
        assert!(validate_range("dashboard.recent_limit", 0, 1, 100).is_err());
        assert!(validate_range("server.port", 0u16, 1, u16::MAX).is_err());
    }
}
