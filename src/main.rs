use crate::config::{Args, CannedBodies};
use crate::server::{ServerSettings, ServerWorker};
use anyhow::{bail, Context};
use clap::Parser;
use log::{debug, info, warn};
use tokio::task::JoinHandle;

mod config;
mod error;
mod fixtures;
mod handlers;
mod model;
mod request;
mod response;
mod router;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Args::parse();
    info!("dipmock started");

    match fdlimit::raise_fd_limit() {
        Ok(fdlimit::Outcome::LimitRaised { from, to }) => {
            debug!("Raised open file limit from {} to {}", from, to)
        }
        Ok(fdlimit::Outcome::Unsupported) => debug!("Raising open file limit is unsupported"),
        Err(err) => warn!("Failed to raise open file limit: {:?}", err),
    }

    let bodies = CannedBodies::build(args.shape).context("Failed to serialize canned responses")?;
    let worker = ServerWorker::bind(args.port, ServerSettings { bodies })
        .await
        .with_context(|| format!("Failed to bind port {}", args.port))?;
    info!(
        "Listening on {} ({:?} responses)",
        worker.local_addr()?,
        args.shape
    );

    let server = worker.run(args.max_connections);

    wait_for_shutdown(server).await?;
    info!("Shutting down");
    Ok(())
}

/// Installs one global logger. With `trace` the tracing subscriber takes
/// over and also receives `log` records.
fn init_logging() {
    #[cfg(not(feature = "trace"))]
    let _ = env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("info"))
        .try_init();
    #[cfg(feature = "trace")]
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// Resolves on Ctrl-C, or SIGTERM on Unix. In-flight requests are not drained.
/// Fails if the server task ends first, so the process exits non-zero.
async fn wait_for_shutdown(mut server: JoinHandle<()>) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res?,
            _ = terminate.recv() => {}
            res = &mut server => return server_stopped(res),
        }
    }
    #[cfg(not(unix))]
    tokio::select! {
        res = tokio::signal::ctrl_c() => res?,
        res = &mut server => return server_stopped(res),
    }
    Ok(())
}

fn server_stopped(res: Result<(), tokio::task::JoinError>) -> anyhow::Result<()> {
    match res {
        Ok(()) => bail!("Server stopped accepting connections"),
        Err(err) => bail!("Server task failed: {}", err),
    }
}
