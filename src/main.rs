//! # Burrow Pool
//!
//! Serves a pool of burrows over HTTP.
//!
//! The `serve` command:
//! 1.  Starts the [`BurrowSystem`].
//! 2.  Streams the initial burrows file into the pool.
//! 3.  Writes the aggregate report on a fixed interval.
//! 4.  Serves `/health`, `/` and `/rent` until ctrl-c, then closes every
//!     burrow and writes the dump file.

use anyhow::Context;
use burrow_pool::framework::PoolConfig;
use burrow_pool::http::{router, AppState};
use burrow_pool::lifecycle::bootstrap;
use burrow_pool::lifecycle::reporter::spawn_report_writer;
use burrow_pool::lifecycle::shutdown::cancelled;
use burrow_pool::lifecycle::{setup_tracing, BurrowSystem};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Burrow pool server
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expose the pool over HTTP
    Serve {
        /// HTTP address to listen on
        #[clap(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,

        /// Initial burrows data
        #[clap(long, default_value = "data/initial.json")]
        path: PathBuf,

        /// Aging tick period in milliseconds
        #[clap(long, default_value_t = 60_000)]
        tick_ms: u64,

        /// How long an offered burrow waits for its assignment, in milliseconds
        #[clap(long, default_value_t = 1_000)]
        grace_ms: u64,

        /// Deadline of each rent request, in milliseconds
        #[clap(long, default_value_t = 3_000)]
        rent_timeout_ms: u64,

        /// File rewritten with the aggregate report
        #[clap(long, default_value = "report.txt")]
        report_path: PathBuf,

        /// Seconds between two reports
        #[clap(long, default_value_t = 60)]
        report_interval_secs: u64,

        /// Directory receiving the shutdown dump
        #[clap(long, default_value = ".")]
        dump_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    match Cli::parse().command {
        Commands::Serve {
            addr,
            path,
            tick_ms,
            grace_ms,
            rent_timeout_ms,
            report_path,
            report_interval_secs,
            dump_dir,
        } => {
            let config = PoolConfig::default()
                .with_tick(Duration::from_millis(tick_ms))
                .with_negotiation_grace(Duration::from_millis(grace_ms))
                .with_dump_dir(dump_dir);

            let system = BurrowSystem::start(config);

            let pool = system.pool.clone();
            let signal = system.signal();
            let loader = tokio::spawn(async move {
                match bootstrap::read_burrows(&path).await {
                    Ok(burrows) => {
                        bootstrap::feed(&pool, burrows, signal).await;
                        let status = pool.current_status().await;
                        info!(count = status.len(), "Pool ready");
                    }
                    Err(e) => {
                        error!(path = %path.display(), error = %e, "Initial burrows not loaded")
                    }
                }
            });

            let reporter = spawn_report_writer(
                system.shared_pool(),
                report_path,
                Duration::from_secs(report_interval_secs),
                system.signal(),
            );

            let state = AppState::new(system.shared_pool())
                .with_rent_timeout(Duration::from_millis(rent_timeout_ms));
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("cannot listen on {addr}"))?;
            info!(%addr, "Listening");

            let mut signal = system.signal();
            let served = axum::serve(listener, router(state))
                .with_graceful_shutdown(async move {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => info!("Interrupt received"),
                        _ = cancelled(&mut signal) => {}
                    }
                })
                .await;

            system.shutdown().await;
            let _ = loader.await;
            let _ = reporter.await;

            served.context("http server failed")?;
        }
    }

    Ok(())
}
