use crate::config::ConvertOptions;
use crate::domain::model::LayoutPolicy;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: Option<OutputConfig>,
    pub layout: Option<LayoutConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: PathBuf,
    pub heading_style: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
    pub sheet_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub max_column_width: Option<usize>,
    pub padding: Option<usize>,
    pub default_column_width: Option<f64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DOCS_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn to_options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::for_input(&self.input.path);

        if let Some(style) = &self.input.heading_style {
            options.heading_style = style.clone();
        }

        if let Some(output) = &self.output {
            options.output_path = output.path.clone();
            if let Some(name) = &output.sheet_name {
                options.sheet_name = name.clone();
            }
        }

        if let Some(layout) = &self.layout {
            let defaults = LayoutPolicy::default();
            options.layout = LayoutPolicy {
                max_width: layout.max_column_width.unwrap_or(defaults.max_width),
                padding: layout.padding.unwrap_or(defaults.padding),
                default_width: layout
                    .default_column_width
                    .unwrap_or(defaults.default_width),
            };
        }

        options
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_options().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[input]
path = "contacts.docx"
heading_style = "Title"

[output]
path = "out/contacts.xlsx"
sheet_name = "Universities"

[layout]
max_column_width = 80
padding = 4
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let options = config.to_options();

        assert_eq!(options.input_path(), Path::new("contacts.docx"));
        assert_eq!(options.output_path(), PathBuf::from("out/contacts.xlsx"));
        assert_eq!(options.heading_style(), "Title");
        assert_eq!(options.sheet_name(), "Universities");
        assert_eq!(options.layout().max_width, 80);
        assert_eq!(options.layout().padding, 4);
        assert_eq!(
            options.layout().default_width,
            LayoutPolicy::DEFAULT_COLUMN_WIDTH
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("[input]\npath = \"a.docx\"\n").unwrap();
        let options = config.to_options();

        assert_eq!(options.output_path(), PathBuf::from("a.xlsx"));
        assert_eq!(options.heading_style(), "Heading 1");
        assert_eq!(options.layout(), LayoutPolicy::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DOCX2XLSX_TEST_DIR", "/data/in");

        let toml_content = r#"
[input]
path = "${DOCX2XLSX_TEST_DIR}/contacts.docx"

[output]
path = "${DOCX2XLSX_TEST_UNSET}/contacts.xlsx"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.path, PathBuf::from("/data/in/contacts.docx"));
        assert_eq!(
            config.output.unwrap().path,
            Some(PathBuf::from("${DOCX2XLSX_TEST_UNSET}/contacts.xlsx"))
        );

        std::env::remove_var("DOCX2XLSX_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[input]
path = "contacts.pdf"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        assert!(TomlConfig::from_toml_str("[output]\npath = \"x.xlsx\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[input]\npath = \"file-test.docx\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.input.path, PathBuf::from("file-test.docx"));
    }
}
