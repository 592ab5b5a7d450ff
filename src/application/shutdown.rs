use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Sending half of the process-wide shutdown channel.
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

/// Create the shutdown channel. Receivers observe `true` once shutdown was
/// requested.
pub fn channel() -> (ShutdownTrigger, watch::Receiver<bool>) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, rx)
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        // send_replace works even when every receiver is gone
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Spawn the signal watcher: the first Ctrl+C/SIGINT triggers shutdown.
    pub fn watch_interrupt(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutdown signal received");
                    self.trigger();
                }
                Err(e) => error!("Failed to listen for interrupt signal: {}", e),
            }
        })
    }
}
