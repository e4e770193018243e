use anyhow::Context;
use clap::Parser;
use docx2xlsx::core::{ConfigProvider, Pipeline};
use docx2xlsx::utils::{logger, validation::Validate};
use docx2xlsx::{CliConfig, DocxPipeline, DocxReader, EtlEngine, XlsxSheetWriter};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting docx2xlsx");
    tracing::debug!("CLI config: {:?}", cli);

    // 解析並驗證配置
    let options = match cli.resolve().and_then(|options| {
        options.validate()?;
        Ok(options)
    }) {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            return Err(e).context("invalid configuration");
        }
    };

    tracing::info!(
        "📋 {} -> {} (heading style '{}')",
        options.input_path().display(),
        options.output_path().display(),
        options.heading_style()
    );

    let pipeline = DocxPipeline::new(DocxReader, XlsxSheetWriter, options);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no spreadsheet will be written");
        let headings = pipeline.extract()?;
        let result = pipeline.transform(headings)?;
        println!("{}", serde_json::to_string_pretty(&result.rows)?);
        return Ok(());
    }

    let engine = EtlEngine::new(pipeline);
    match engine.run() {
        Ok(output_path) => {
            tracing::info!("✅ Conversion completed: {}", output_path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            Err(e.into())
        }
    }
}
