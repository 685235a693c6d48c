//! Debouncing of typed search text.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spawn a task that forwards the latest input once `quiet` has elapsed
/// without a newer one.
///
/// Closing `input` flushes a pending value and ends the task; dropping the
/// returned receiver ends it too.
pub fn spawn_debouncer(
    quiet: Duration,
    mut input: mpsc::Receiver<String>,
) -> (mpsc::Receiver<String>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(16);

    let handle = tokio::spawn(async move {
        let mut pending: Option<String> = None;

        loop {
            match pending.take() {
                None => match input.recv().await {
                    Some(text) => pending = Some(text),
                    None => break,
                },
                Some(text) => {
                    tokio::select! {
                        next = input.recv() => match next {
                            Some(newer) => pending = Some(newer),
                            None => {
                                let _ = tx.send(text).await;
                                break;
                            }
                        },
                        _ = tokio::time::sleep(quiet) => {
                            tracing::debug!(search = %text, "search input settled");
                            if tx.send(text).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        }

        tracing::debug!("search debouncer stopped");
    });

    (rx, handle)
}
