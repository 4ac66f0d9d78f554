use clap::Parser;
use ecce_calendar::core::writer;
use ecce_calendar::core::{ConfigProvider, Pipeline, TransformResult};
use ecce_calendar::utils::error::ErrorSeverity;
use ecce_calendar::utils::{logger, validation::Validate};
use ecce_calendar::{CalendarPipeline, CliConfig, EtlEngine, EtlError, LocalStorage, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ecce-calendar");

    if let Err(e) = config.load_settings().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }
    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let preview = config.preview;
    let dry_run = config.dry_run;
    let monitor_enabled = config.monitor;
    let date_format = config.output_date_format().to_string();

    let storage = LocalStorage::new(".");
    let pipeline = CalendarPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match process(&engine, preview, dry_run, &date_format).await {
        Ok(Some(output_path)) => {
            tracing::info!("✅ Calendar processed");
            println!("✅ Processed CSV saved to: {}", output_path);
        }
        Ok(None) => {
            tracing::info!("🔍 Dry run - nothing written");
        }
        Err(e) => exit_with(e),
    }
}

async fn process<P: Pipeline>(
    engine: &EtlEngine<P>,
    preview: bool,
    dry_run: bool,
    date_format: &str,
) -> Result<Option<String>> {
    let result = engine.prepare().await?;
    if preview {
        writer::write_preview(std::io::stdout().lock(), &result.entries, date_format)?;
    }
    if dry_run {
        print_summary(&result)?;
        return Ok(None);
    }
    engine.finish(result).await.map(Some)
}

fn print_summary(result: &TransformResult) -> Result<()> {
    let summary = serde_json::json!({
        "closures": result.entries.len(),
        "dropped_one_day": result.dropped,
        "rows": result.rows,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn exit_with(e: EtlError) -> ! {
    tracing::error!(
        "❌ Processing failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
