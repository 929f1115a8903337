//! watchpost-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), loads the
//! object definitions it points at, and serves authorization decisions over
//! HTTP.
//!
//! # Checking object definitions
//!
//! ```text
//! cargo run -p watchpost-server -- --check
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use watchpost_graph::{ObjectDefinitions, ObjectGraph};
use watchpost_server::{AppState, ServerConfig};

#[derive(Parser)]
#[command(author, version, about = "Watchpost authorization decision server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load and validate the object definitions, then exit.
  #[arg(long)]
  check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("WATCHPOST"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let defs = ObjectDefinitions::load(&server_cfg.objects_path).with_context(|| {
    format!("failed to load objects from {:?}", server_cfg.objects_path)
  })?;
  let graph = ObjectGraph::from_definitions(defs).context("invalid object definitions")?;

  // Helper mode: validate and exit.
  if cli.check {
    println!(
      "{}: {} hosts, {} services, {} contacts",
      server_cfg.objects_path.display(),
      graph.hosts().count(),
      graph.services().count(),
      graph.contacts().count(),
    );
    return Ok(());
  }

  tracing::info!(
    service_authorization = %server_cfg.service_authorization,
    group_authorization   = %server_cfg.group_authorization,
    "authorization modes"
  );

  let state = AppState {
    graph:  Arc::new(graph),
    config: Arc::new(server_cfg.clone()),
  };

  let app = watchpost_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
