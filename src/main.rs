use anyhow::Context;
use clap::{Parser, Subcommand};
use record_query::core::{ConfigProvider, Storage};
use record_query::utils::{logger, validation::Validate};
use record_query::{
    describe_plan, mean, CliConfig, FileRecordSource, LocalStorage, QueryEngine, QueryError,
    QueryRequest, TomlConfig,
};
use std::io::Write;

#[derive(Parser)]
#[command(name = "record-query")]
#[command(about = "Look up, filter and summarize person records")]
struct Cli {
    #[arg(long, global = true, help = "Enable verbose output")]
    verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load records from files and run a lookup and filter over them
    Query(CliConfig),
    /// Print the arithmetic mean of the given numbers
    Mean {
        #[arg(allow_negative_numbers = true)]
        numbers: Vec<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Mean { numbers } => {
            init_logging(cli.verbose, cli.log_json);
            run_mean(&numbers)
        }
        Command::Query(args) => run_query(args, cli.verbose, cli.log_json).await,
    };

    match result {
        Ok(Some(output)) => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", output.trim_end()).context("failed to write to stdout")?;
        }
        Ok(None) => {}
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn init_logging(verbose: bool, json: bool) {
    if json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
}

fn run_mean(numbers: &[f64]) -> record_query::Result<Option<String>> {
    tracing::debug!("Calculating mean of {} numbers", numbers.len());
    mean(numbers).map(|value| Some(value.to_string()))
}

async fn run_query(
    args: CliConfig,
    verbose: bool,
    log_json: bool,
) -> record_query::Result<Option<String>> {
    match args.config.clone() {
        Some(path) => {
            let mut config = TomlConfig::from_file(&path)?;
            config.apply_cli_overrides(&args);
            init_logging(verbose || config.log_verbose(), log_json || config.log_json());
            tracing::info!("📁 Loaded configuration from: {}", path);

            let base_dir = config.base_dir().to_string();
            execute(config, base_dir, args.dry_run).await
        }
        None => {
            init_logging(verbose, log_json);
            let dry_run = args.dry_run;
            execute(args, ".".to_string(), dry_run).await
        }
    }
}

async fn execute<C>(
    config: C,
    base_dir: String,
    dry_run: bool,
) -> record_query::Result<Option<String>>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - no files will be read");
        return Ok(Some(describe_plan(&config, &base_dir)));
    }

    let format = config.output_format();
    let output_path = config.output_path().map(str::to_string);
    let request = QueryRequest::from_config(&config);

    let engine = QueryEngine::new(FileRecordSource::new(LocalStorage::new(base_dir), config));
    let report = engine.run(&request).await?;
    let rendered = report.render(format)?;

    match output_path {
        Some(path) => {
            LocalStorage::new(".".to_string())
                .write_file(&path, rendered.as_bytes())
                .await?;
            tracing::info!("📁 Report saved to: {}", path);
            Ok(None)
        }
        None => Ok(Some(rendered)),
    }
}

fn exit_with(e: &QueryError) -> ! {
    tracing::error!(
        "❌ Query failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
