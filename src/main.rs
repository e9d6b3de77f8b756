// src/main.rs
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2markdown::{
    deliver, CommandLineInput, ContentSource, DeliveryTarget, ExportConfig, ExportedPage,
    NotionHttpClient, OutputPlan, OutputReport, PageExporter,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration. Console output goes to stderr; stdout
/// carries the Markdown.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion2markdown.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Resolves the page, exports it and delivers the Markdown.
async fn execute_export(config: &ExportConfig) -> anyhow::Result<()> {
    let client = NotionHttpClient::new(&config.api_key)?;
    let source: Arc<dyn ContentSource> = Arc::new(client);
    let exporter = PageExporter::new(source, config.export_options());

    let exported = exporter
        .export_target(&config.target)
        .await
        .map_err(|e| {
            match e.notion_code() {
                Some(code) if code.is_not_found() => {
                    log::error!("Is the page shared with the integration?")
                }
                Some(code) if code.is_auth_failure() => {
                    log::error!("Check the API key and the integration's capabilities.")
                }
                _ => {}
            }
            e
        })
        .context("export failed")?;

    let plan = OutputPlan::for_markdown(
        exported.markdown.as_str().to_string(),
        config.output_file.clone(),
    );
    let report = deliver(plan).into_result()?;
    report_completion(&exported, &report);

    Ok(())
}

/// Reports warnings and delivery confirmations on stderr.
fn report_completion(exported: &ExportedPage, report: &OutputReport) {
    for message in exported.warning_messages() {
        eprintln!("⚠️  {}", message);
    }
    if exported.is_degraded() {
        eprintln!("⚠️  Some content could not be exported; the document is incomplete.");
    }

    for completed in &report.completed {
        if let DeliveryTarget::WriteFile { path, .. } = &completed.operation {
            eprintln!(
                "✓ {} block(s) exported to {} ({} bytes in {}ms)",
                exported.stats.total_blocks,
                path.display(),
                completed.bytes_written,
                completed.duration_ms
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = ExportConfig::resolve(cli)?;

    execute_export(&config).await
}
