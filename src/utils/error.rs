use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("XLSX write error: {0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),

    #[error("XLSX read error: {0}")]
    XlsxReadError(#[from] calamine::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Document error: {message}")]
    DocumentError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
    Processing,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ZipError(_) | EtlError::XmlError(_) | EtlError::DocumentError { .. } => {
                ErrorCategory::Input
            }
            EtlError::XlsxWriteError(_) | EtlError::XlsxReadError(_) => ErrorCategory::Output,
            // IO 錯誤無法分辨來源，一律視為輸入問題
            EtlError::IoError(_) => ErrorCategory::Input,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ZipError(_) => {
                "Make sure the input is a .docx file saved by Word (not a legacy .doc)"
            }
            EtlError::XmlError(_) | EtlError::DocumentError { .. } => {
                "Open and re-save the document in Word to repair its structure"
            }
            EtlError::XlsxWriteError(_) | EtlError::XlsxReadError(_) => {
                "Close the workbook if it is open in Excel and check the output path"
            }
            EtlError::IoError(_) => "Check that the path exists and that you have permission",
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => {
                "Fix the configuration file or command line arguments"
            }
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                "Re-run with --verbose and report the log"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let err = EtlError::DocumentError {
            message: "missing word/document.xml".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);

        let err = EtlError::MissingConfigError {
            field: "input.path".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.to_string(), "Missing required configuration: input.path");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: EtlError = io.into();
        assert!(matches!(err, EtlError::IoError(_)));
        assert!(!err.recovery_suggestion().is_empty());
    }
}
