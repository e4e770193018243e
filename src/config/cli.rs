use crate::config::toml_config::TomlConfig;
use crate::config::ConvertOptions;
use crate::utils::error::{EtlError, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "docx2xlsx")]
#[command(about = "Convert a heading-structured Word document into an Excel sheet")]
pub struct CliConfig {
    /// Input .docx file (overrides the config file)
    pub input: Option<PathBuf>,

    /// Output .xlsx file; defaults to the input name with .xlsx
    pub output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Paragraph style that starts a new row
    #[arg(long)]
    pub heading_style: Option<String>,

    #[arg(long)]
    pub sheet_name: Option<String>,

    /// Maximum column width in characters
    #[arg(long)]
    pub max_width: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    /// Show the extracted rows as JSON without writing a spreadsheet
    #[arg(long)]
    pub dry_run: bool,
}

impl CliConfig {
    /// Merges the optional config file with command line overrides.
    pub fn resolve(&self) -> Result<ConvertOptions> {
        let mut options = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                let file_config = TomlConfig::from_file(path)?;
                let mut options = file_config.to_options();
                if let Some(input) = &self.input {
                    options.input_path = input.clone();
                }
                options
            }
            None => {
                let input = self.input.clone().ok_or_else(|| EtlError::MissingConfigError {
                    field: "input.path".to_string(),
                })?;
                ConvertOptions::for_input(input)
            }
        };

        // 命令列參數優先於設定檔
        if let Some(output) = &self.output {
            options.output_path = Some(output.clone());
        }
        if let Some(style) = &self.heading_style {
            options.heading_style = style.clone();
        }
        if let Some(name) = &self.sheet_name {
            options.sheet_name = name.clone();
        }
        if let Some(max_width) = self.max_width {
            options.layout.max_width = max_width;
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_positional_paths() {
        let cli = CliConfig::parse_from(["docx2xlsx", "in.docx", "out.xlsx", "--max-width", "60"]);
        let options = cli.resolve().unwrap();

        assert_eq!(options.input_path(), PathBuf::from("in.docx").as_path());
        assert_eq!(options.output_path(), PathBuf::from("out.xlsx"));
        assert_eq!(options.layout().max_width, 60);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let cli = CliConfig::parse_from(["docx2xlsx"]);
        let err = cli.resolve().unwrap_err();
        assert!(matches!(err, EtlError::MissingConfigError { .. }));
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                b"[input]\npath = \"from-file.docx\"\nheading_style = \"Title\"\n[output]\nsheet_name = \"FromFile\"\n",
            )
            .unwrap();
        let config_path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from([
            "docx2xlsx",
            "--config",
            config_path.as_str(),
            "--sheet-name",
            "FromCli",
        ]);
        let options = cli.resolve().unwrap();

        assert_eq!(options.input_path(), PathBuf::from("from-file.docx").as_path());
        assert_eq!(options.output_path(), PathBuf::from("from-file.xlsx"));
        assert_eq!(options.heading_style(), "Title");
        assert_eq!(options.sheet_name(), "FromCli");
    }
}
