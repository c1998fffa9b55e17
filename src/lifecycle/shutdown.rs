//! Pool-wide cancellation signal.
//!
//! A `watch` channel carrying `true` once shutdown is requested. Any number of
//! tasks can hold a receiver; dropping the sender counts as a request too.

use tokio::sync::watch;

/// Creates the trigger and the first receiver of a shutdown signal.
pub fn shutdown_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Resolves once shutdown was requested or the trigger is gone.
pub async fn cancelled(signal: &mut watch::Receiver<bool>) {
    let _ = signal.wait_for(|stop| *stop).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancelled_on_trigger() {
        let (trigger, mut signal) = shutdown_channel();
        let waiter = tokio::spawn(async move { cancelled(&mut signal).await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        trigger.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_on_drop() {
        let (trigger, mut signal) = shutdown_channel();
        drop(trigger);
        tokio::time::timeout(Duration::from_secs(1), cancelled(&mut signal))
            .await
            .unwrap();
    }
}
