use clap::Parser;
use small_calc::utils::error::{CalcError, ErrorSeverity};
use small_calc::utils::{logger, validation::Validate};
use small_calc::{
    BatchArgs, BatchPipeline, CalcEngine, Calculator, CliConfig, Command, LocalStorage,
    OverflowMode,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let outcome = match config.command {
        Command::Eval {
            operation,
            a,
            b,
            checked,
        } => {
            let mode = if checked {
                OverflowMode::Checked
            } else {
                OverflowMode::Wrapping
            };
            Calculator::with_overflow_mode(mode)
                .apply(operation, a, b)
                .map(|value| println!("{}", value))
        }
        Command::Batch(args) => run_batch(args).await,
    };

    if let Err(e) = outcome {
        exit_with(&e);
    }

    Ok(())
}

async fn run_batch(args: BatchArgs) -> small_calc::Result<()> {
    tracing::info!("Starting small-calc batch run");

    let monitor_enabled = args.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(".");
    let pipeline = BatchPipeline::new(storage, args);
    let engine = CalcEngine::new_with_monitoring(pipeline, monitor_enabled);

    let output_path = engine.run().await?;
    tracing::info!("✅ Batch completed successfully!");
    println!("✅ Batch completed successfully!");
    println!("📁 Output saved to: {}", output_path);
    Ok(())
}

fn exit_with(e: &CalcError) {
    tracing::error!(
        "❌ Calculation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}
