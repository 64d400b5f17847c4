use crate::utils::error::{ExplorerError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ExplorerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ExplorerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(ExplorerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(ExplorerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(ExplorerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ExplorerError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExplorerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
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
        return Err(ExplorerError::InvalidConfigValueError {
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
    fn test_validate_range() {
        assert!(validate_range("query.radius", 3u32, 0, 118).is_ok());
        assert!(validate_range("query.radius", 0u32, 0, 118).is_ok());
        assert!(validate_range("query.radius", 200u32, 0, 118).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("source.path", "tabla_nucleidos.csv", &["csv", "tsv"]).is_ok());
        assert!(validate_file_extension("source.path", "TABLA.CSV", &["csv", "tsv"]).is_ok());
        assert!(validate_file_extension("source.path", "data.xlsx", &["csv", "tsv"]).is_err());
        assert!(validate_file_extension("source.path", "noext", &["csv", "tsv"]).is_err());
    }

    #[test]
    fn test_validate_non_empty_and_required() {
        assert!(validate_non_empty_string("symbol", "  ").is_err());
        assert!(validate_non_empty_string("symbol", "Fe").is_ok());

        let missing: Option<String> = None;
        assert!(validate_required_field("source.path", &missing).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("output.formats", "json", &["csv", "tsv", "json"]).is_ok());
        assert!(validate_one_of("output.formats", "xml", &["csv", "tsv", "json"]).is_err());
    }
}
