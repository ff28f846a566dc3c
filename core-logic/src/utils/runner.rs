use std::future::Future;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub struct WorkerRunner;

impl WorkerRunner {
    /// Runs `work` with a token that gets cancelled on Ctrl+C / SIGTERM.
    ///
    /// The worker never sees the signal itself, only the token.
    pub async fn run_until_shutdown<F, Fut, T>(work: F) -> T
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = T>,
    {
        let token = CancellationToken::new();
        let listener = spawn_signal_listener(token.clone());

        let start_time = std::time::Instant::now();
        let output = work(token).await;
        listener.abort();

        info!(
            "🛑 Shutdown Complete. Total Time: {:.1}s",
            start_time.elapsed().as_secs_f64()
        );
        output
    }
}

/// Cancels `token` every time a stop signal arrives.
///
/// Cancelling is idempotent, so repeated signals only produce a log line.
pub fn spawn_signal_listener(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match wait_for_signal().await {
                Ok(name) => {
                    if token.is_cancelled() {
                        warn!("Received {} again, already stopping...", name);
                    } else {
                        info!("\n\n🛑 Received {}. Stopping...", name);
                        token.cancel();
                    }
                }
                Err(err) => {
                    error!("Unable to listen for shutdown signal: {}", err);
                    return;
                }
            }
        }
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal as unix_signal, SignalKind};

    let mut terminate = unix_signal(SignalKind::terminate())?;
    tokio::select! {
        res = signal::ctrl_c() => res.map(|_| "interrupt signal"),
        _ = terminate.recv() => Ok("termination signal"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    signal::ctrl_c().await.map(|_| "interrupt signal")
}
