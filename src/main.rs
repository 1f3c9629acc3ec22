use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
use config::{AppConfig, CliConfig, FileConfig};

mod customer_store;
use customer_store::{CustomerStore, SqliteCustomerStore};

mod document;
use document::{FileTemplateSource, TextDocumentRenderer};

mod notification;

mod server;
use server::{run_metrics_server, run_server, RequestsLoggingLevel};

mod work;
use work::create_engine;

use tokio_util::sync::CancellationToken;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding the SQLite customer database.
    #[clap(value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// Directory the notification documents are written into.
    #[clap(long, default_value = "documents", value_parser = parse_path)]
    pub output_dir: PathBuf,

    /// Path to the TOML document template.
    #[clap(long, default_value = "template.toml", value_parser = parse_path)]
    pub template_path: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };

    let cli_config = CliConfig {
        db_dir: cli_args.db_dir.clone(),
        output_dir: cli_args.output_dir.clone(),
        template_path: cli_args.template_path.clone(),
        port: cli_args.port,
        metrics_port: cli_args.metrics_port,
        logging_level: cli_args.logging_level.clone(),
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!(
        "Opening SQLite customer database at {:?}...",
        config.customer_db_path()
    );
    let customer_store: Arc<dyn CustomerStore> =
        Arc::new(SqliteCustomerStore::open(&config.customer_db_path())?);

    info!("Initializing metrics...");
    server::metrics::init_metrics();

    let renderer = Arc::new(TextDocumentRenderer);
    let templates = Arc::new(FileTemplateSource::new(&config.template_path));

    let shutdown = CancellationToken::new();
    let (processor, engine) = create_engine(
        Arc::clone(&customer_store),
        renderer,
        templates,
        config.output_dir.clone(),
        shutdown.clone(),
    );
    let processor_task = tokio::spawn(processor.run(shutdown.clone()));

    let metrics_port = config.metrics_port;
    tokio::spawn(async move {
        if let Err(e) = run_metrics_server(metrics_port).await {
            error!("Metrics server failed: {:#}", e);
        }
    });

    info!("Ready to serve at port {}!", config.port);
    info!("Metrics available at port {}!", config.metrics_port);

    let engine = Arc::new(engine);
    tokio::select! {
        result = run_server(
            customer_store,
            engine,
            config.logging_level.clone(),
            config.port,
        ) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
            shutdown.cancel();
            let _ = processor_task.await;
        }
    }

    Ok(())
}
