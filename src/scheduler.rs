use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{ interval, Duration };
use tracing::{ error, info };

use crate::error::Result;

/// A named periodic trigger. Each instance owns one cadence and one job; the
/// tick's work is awaited to completion before the next tick of the same job,
/// while independent instances run concurrently.
pub struct PeriodicJob {
    name: &'static str,
    period: Duration,
}

impl PeriodicJob {
    pub fn new(name: &'static str, period: Duration) -> Self {
        Self { name, period }
    }

    /// Spawn the timer loop. A failing tick is logged and dropped; the next
    /// tick is the retry mechanism. The first tick fires immediately.
    pub fn start<F, Fut>(self, mut job: F) -> JobHandle
        where F: FnMut() -> Fut + Send + 'static, Fut: Future<Output = Result<()>> + Send
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let name = self.name;

        let handle = tokio::spawn(async move {
            let mut ticker = interval(self.period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = job().await {
                            error!("{} job failed: {}", name, e);
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        break;
                    }
                }
            }
        });

        JobHandle {
            name,
            shutdown: shutdown_tx,
            handle,
        }
    }
}

/// Running timer loop. The loop ends when the handle goes away; call
/// [`JobHandle::stop`] to also wait for the task to finish.
pub struct JobHandle {
    name: &'static str,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl JobHandle {
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
        info!("{} job stopped", self.name);
    }
}
