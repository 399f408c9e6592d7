pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub use config::Config;

#[derive(Parser)]
#[command(name = "moviedb")]
#[command(about = "Movie catalog HTTP service", long_about = None, version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Write a default config.toml in the current directory if none exists
    Init,

    /// Load and validate the configuration, then print the effective settings
    CheckConfig,
}

/// Dispatches the CLI command using a config the caller has already loaded.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Init => cmd_init(),
        Command::CheckConfig => cmd_check_config(&config),
        Command::Serve => {
            config.validate()?;
            run_server(config).await
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    init_tracing(&config);
    match &config.source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }
    if prometheus_handle.is_some() {
        info!("Prometheus metrics recorder initialized");
    }

    info!("Connecting to {}", config.database.redacted_url());
    let addr = config.bind_addr();
    let state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }
}

fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with default settings.");
    } else {
        println!("config.toml already exists, leaving it untouched.");
    }
    Ok(())
}

fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    config.validate()?;

    println!("Configuration OK");
    println!();
    match &config.source {
        Some(path) => println!("  Config file:      {}", path.display()),
        None => println!("  Config file:      (defaults)"),
    }
    println!("  Listen address:   {}", config.bind_addr());
    println!("  Database:         {}", config.database.redacted_url());
    println!(
        "  Pool size:        {}-{}",
        config.database.min_connections, config.database.max_connections
    );
    println!(
        "  Log level:        {} ({})",
        config.general.log_level, config.general.log_format
    );
    println!(
        "  Argon2id:         m={} KiB, t={}, p={}",
        config.security.argon2_memory_cost_kib,
        config.security.argon2_time_cost,
        config.security.argon2_parallelism
    );
    println!(
        "  Metrics:          {}",
        if config.observability.metrics_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    Ok(())
}
