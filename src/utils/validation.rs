use crate::utils::error::{EtlError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Characters Excel refuses in worksheet names.
const SHEET_NAME_FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];
const SHEET_NAME_MAX_CHARS: usize = 31;

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.display().to_string();

    if path.as_os_str().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display,
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display,
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    path: &Path,
    allowed_extensions: &[&str],
) -> Result<()> {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        });
    };

    if allowed_extensions
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    {
        return Ok(());
    }

    Err(EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: path.display().to_string(),
        reason: format!(
            "Unsupported file extension: {}. Allowed extensions: {}",
            extension,
            allowed_extensions.join(", ")
        ),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_sheet_name(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if value.chars().count() > SHEET_NAME_MAX_CHARS {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Sheet name must be at most {} characters", SHEET_NAME_MAX_CHARS),
        });
    }

    if let Some(ch) = value.chars().find(|ch| SHEET_NAME_FORBIDDEN.contains(ch)) {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Sheet name cannot contain '{}'", ch),
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
        return Err(EtlError::InvalidConfigValueError {
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
        assert!(validate_path("input.path", Path::new("report.docx")).is_ok());
        assert!(validate_path("input.path", Path::new("")).is_err());
        assert!(validate_path("input.path", Path::new("bad\0name.docx")).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input.path", Path::new("a/b.docx"), &["docx"]).is_ok());
        assert!(validate_file_extension("input.path", Path::new("B.DOCX"), &["docx"]).is_ok());
        assert!(validate_file_extension("input.path", Path::new("b.doc"), &["docx"]).is_err());
        assert!(validate_file_extension("input.path", Path::new("noext"), &["docx"]).is_err());
    }

    #[test]
    fn test_validate_sheet_name() {
        assert!(validate_sheet_name("output.sheet_name", "Sheet1").is_ok());
        assert!(validate_sheet_name("output.sheet_name", "  ").is_err());
        assert!(validate_sheet_name("output.sheet_name", "a/b").is_err());
        assert!(validate_sheet_name("output.sheet_name", &"x".repeat(32)).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("layout.max_column_width", 50, 1, 255).is_ok());
        assert!(validate_range("layout.max_column_width", 0, 1, 255).is_err());
        assert!(validate_range("layout.default_column_width", 300.0, 0.0, 255.0).is_err());
    }
}
