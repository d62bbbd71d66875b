use clap::Parser;
use eyre::{Context, Result};
use sensorlog::config::Config;
use sensorlog::pipeline;
use sensorlog::sink::CsvSink;
use std::fs::File;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

static LONG_VERSION: OnceLock<String> = OnceLock::new();

fn get_long_version() -> &'static str {
    LONG_VERSION.get_or_init(|| {
        format!(
            "{} (commit: {})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_REVISION", "unknown")
        )
    })
}

#[derive(Parser)]
#[command(name = "sensorlog")]
#[command(about = "concurrent sensor reading collector")]
#[command(version = None, long_version = get_long_version())]
struct Args {
    #[arg(help = "binary sensor readings file")]
    input: String,

    #[arg(
        short,
        long,
        default_value = "readings.csv",
        help = "output file for csv records"
    )]
    output: String,

    #[arg(short, long, help = "configuration file path (toml format)")]
    config: Option<String>,

    #[arg(short, long, help = "number of worker threads (overrides config)")]
    workers: Option<usize>,

    #[arg(long, help = "append to the output file instead of truncating")]
    append: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = match args.config.as_deref() {
        Some(path) => {
            Config::load(path).with_context(|| format!("failed to load config path={path}"))?
        }
        None => Config::default(),
    };
    if let Some(workers) = args.workers {
        config.pipeline.workers = workers;
    }
    if args.append {
        config.pipeline.append = true;
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let s = shutdown.clone();
    ctrlc::set_handler(move || {
        tracing::info!("received ctrl+c, shutting down gracefully...");
        s.store(true, Ordering::SeqCst);
    })?;

    let source = File::open(&args.input)
        .with_context(|| format!("failed to open input path={}", args.input))?;
    let sink = CsvSink::create(&args.output, config.pipeline.append)
        .with_context(|| format!("failed to open output path={}", args.output))?;

    let summary = pipeline::run(source, sink, &config.pipeline, shutdown)?;

    tracing::info!(
        produced = summary.produced,
        consumed = summary.consumed,
        dropped = summary.dropped,
        output = %args.output,
        "collection complete"
    );
    Ok(())
}
