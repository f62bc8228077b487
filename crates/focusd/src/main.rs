//! focusd - The focus session service
//!
//! This is the main entry point for the focusd service.
//! It wires together all the components:
//! - Configuration loading
//! - Store initialization and the store worker
//! - Foreground sampler (Linux)
//! - Focus engine and gateway
//! - HTTP API

use anyhow::{Context, Result};
use clap::Parser;
use focus_api::WhitelistPreset;
use focus_config::{load_config, load_config_or_default, Config, SamplerKind};
use focus_core::{FocusEngine, FocusGateway};
use focus_host_api::ForegroundSampler;
use focus_host_linux::{create_sampler, LinuxBackend};
use focus_http::AppState;
use focus_store::{spawn_store_worker, SqliteStore, Store, StoreWriter};
use focus_util::{
    default_config_path, DB_FILENAME, FOCUSD_CONFIG_ENV, FOCUSD_DATA_DIR_ENV, FOCUSD_LISTEN_ENV,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// How long shutdown waits for queued store writes
const STORE_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// focusd - Time-boxed focus sessions with application and website whitelists
#[derive(Parser, Debug)]
#[command(name = "focusd")]
#[command(about = "Time-boxed focus sessions with application and website whitelists", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/focusd/config.toml)
    #[arg(short, long, env = FOCUSD_CONFIG_ENV)]
    config: Option<PathBuf>,

    /// HTTP listen address override (or set FOCUSD_LISTEN env var)
    #[arg(long, env = FOCUSD_LISTEN_ENV)]
    listen: Option<SocketAddr>,

    /// Data directory override (or set FOCUSD_DATA_DIR env var)
    #[arg(short, long, env = FOCUSD_DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Main service state
struct Service {
    gateway: FocusGateway,
    store: Arc<dyn Store>,
    writer: StoreWriter,
    worker: JoinHandle<()>,
    listener: TcpListener,
    presets: Vec<WhitelistPreset>,
}

impl Service {
    async fn new(args: &Args) -> Result<Self> {
        let config = load(args)?;

        let listen_addr = args.listen.unwrap_or(config.service.listen_addr);
        let data_dir = args
            .data_dir
            .clone()
            .unwrap_or_else(|| config.service.data_dir.clone());

        // Create data directory
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

        // Initialize store
        let db_path = data_dir.join(DB_FILENAME);
        let store: Arc<dyn Store> = Arc::new(
            SqliteStore::open(&db_path)
                .with_context(|| format!("Failed to open database {:?}", db_path))?,
        );

        info!(db_path = %db_path.display(), "Store initialized");

        let (writer, worker) =
            spawn_store_worker(store.clone(), config.service.store_queue_capacity);

        let sampler = select_sampler(config.sampler);

        let engine = FocusEngine::new(
            Arc::new(writer.clone()),
            config.service.default_grace_seconds,
        );
        let gateway = FocusGateway::new(engine, sampler);

        let listener = TcpListener::bind(listen_addr)
            .await
            .with_context(|| format!("Failed to bind {}", listen_addr))?;

        info!(addr = %listen_addr, "HTTP API listening");

        Ok(Self {
            gateway,
            store,
            writer,
            worker,
            listener,
            presets: config.presets,
        })
    }

    async fn run(self) -> Result<()> {
        let Service {
            gateway,
            store,
            writer,
            worker,
            listener,
            presets,
        } = self;

        let app = focus_http::router(AppState::new(
            gateway.clone(),
            store,
            writer.clone(),
            presets,
        ));

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        // Set up signal handlers
        let mut sigterm = signal(SignalKind::terminate())
            .context("Failed to create SIGTERM handler")?;
        let mut sigint = signal(SignalKind::interrupt())
            .context("Failed to create SIGINT handler")?;
        let mut sighup = signal(SignalKind::hangup())
            .context("Failed to create SIGHUP handler")?;

        info!("Service running");

        let server_exited = tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully");
                false
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully");
                false
            }
            _ = sighup.recv() => {
                info!("Received SIGHUP, shutting down gracefully");
                false
            }
            result = &mut server => {
                match result {
                    Ok(Ok(())) => warn!("HTTP server exited"),
                    Ok(Err(e)) => error!(error = %e, "HTTP server error"),
                    Err(e) => error!(error = %e, "HTTP server task failed"),
                }
                true
            }
        };

        // Graceful shutdown
        info!("Shutting down focusd");

        // Record the running session, if any, as aborted
        gateway.shutdown().await;

        if !writer.flush().await {
            warn!("Store worker exited before the queue was drained");
        }

        let _ = shutdown_tx.send(());
        if !server_exited {
            let _ = server.await;
        }

        // The worker stops once the last writer is gone
        drop(gateway);
        drop(writer);
        if tokio::time::timeout(STORE_DRAIN_TIMEOUT, worker).await.is_err() {
            warn!("Timed out waiting for the store worker");
        }

        info!("Shutdown complete");
        Ok(())
    }
}

fn load(args: &Args) -> Result<Config> {
    let (config, path) = match &args.config {
        Some(path) => (
            load_config(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            path.clone(),
        ),
        None => {
            let path = default_config_path();
            (
                load_config_or_default(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))?,
                path,
            )
        }
    };

    info!(
        config_path = %path.display(),
        presets = config.presets.len(),
        sampler = %config.sampler,
        "Configuration loaded"
    );

    Ok(config)
}

fn select_sampler(kind: SamplerKind) -> Arc<dyn ForegroundSampler> {
    let backend = match kind {
        SamplerKind::Auto => LinuxBackend::detect(),
        SamplerKind::Sway => Some(LinuxBackend::Sway),
        SamplerKind::X11 => Some(LinuxBackend::X11),
        SamplerKind::None => None,
    };
    create_sampler(backend)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        mock_time = focus_util::is_mock_time_active(),
        "focusd starting"
    );

    let service = Service::new(&args).await?;
    service.run().await
}
