//! # Pool Manager Client
//!
//! [`PoolManager`] is the cloneable handle of the pool. Admissions and registry
//! reads go to the control loop; status and rentout fan out to the actors from
//! the caller's task and fan the replies back in.

use crate::burrow_actor::BurrowHandle;
use crate::clients::BurrowPool;
use crate::framework::{
    fan_in_channel, offer_channel, AssignRequest, BurrowRequest, BurrowResponse, PoolConfig,
    PoolError, RentError,
};
use crate::model::Burrow;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant};
use tracing::{debug, info, instrument, warn};

use super::control::{ControlLoop, ControlMessage};

#[derive(Clone)]
pub struct PoolManager {
    sender: mpsc::Sender<ControlMessage>,
    done: watch::Receiver<bool>,
}

impl PoolManager {
    /// Starts the control loop and returns the handle to it.
    ///
    /// `shutdown` is the external cancellation signal: once it reads `true` the
    /// pool closes every actor, dumps their final state and reports completion
    /// through [`done`](Self::done).
    pub fn new(config: PoolConfig, shutdown: watch::Receiver<bool>) -> Self {
        let (sender, receiver) = mpsc::channel(config.mailbox_capacity.max(1));
        let (done_tx, done) = watch::channel(false);

        let control = ControlLoop::new(receiver, config, done_tx);
        tokio::spawn(control.run(shutdown));

        Self { sender, done }
    }

    /// Resolves once the pool has fully shut down.
    pub async fn done(&self) {
        let mut done = self.done.clone();
        let _ = done.wait_for(|finished| *finished).await;
    }

    #[instrument(skip(self, burrow), fields(name = %burrow.name))]
    pub async fn admit(&self, burrow: Burrow) -> Result<String, PoolError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ControlMessage::Admit { burrow, respond_to })
            .await
            .map_err(|_| PoolError::PoolClosed)?;
        response.await.map_err(|_| PoolError::PoolClosed)?
    }

    /// Admits every burrow received on `incoming` until the channel closes or
    /// the pool shuts down. Rejected burrows are logged and skipped.
    ///
    /// Returns the number of admitted burrows.
    pub async fn load(&self, mut incoming: mpsc::Receiver<Burrow>) -> usize {
        let mut admitted = 0;
        while let Some(burrow) = incoming.recv().await {
            match self.admit(burrow).await {
                Ok(_) => admitted += 1,
                Err(PoolError::PoolClosed) => {
                    warn!("Pool closed while loading");
                    break;
                }
                Err(e) => warn!(error = %e, "Skipping burrow"),
            }
        }
        admitted
    }

    /// Handles registered right now, or `None` once the pool has shut down.
    async fn registry(&self) -> Option<Vec<BurrowHandle>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ControlMessage::List { respond_to })
            .await
            .ok()?;
        response.await.ok()
    }

    #[instrument(skip(self))]
    pub async fn current_status(&self) -> Vec<Burrow> {
        let Some(burrows) = self.registry().await else {
            debug!("Pool closed, no status");
            return Vec::new();
        };

        let expected = burrows.len();
        let (respond_to, mut replies) = fan_in_channel(expected);
        for handle in &burrows {
            handle.dispatch(BurrowRequest::Status {
                respond_to: respond_to.clone(),
            });
        }
        drop(respond_to);

        // Replies arrive in any order. A closed actor drops its request, which
        // ends the stream early instead of hanging.
        let mut status = Vec::with_capacity(expected);
        while status.len() < expected {
            match replies.recv().await {
                Some(reply) => status.push(reply.burrow),
                None => break,
            }
        }
        status
    }

    /// Two-phase allocation bounded by `deadline`.
    ///
    /// 1. Broadcast `Available`; only available burrows publish an offer and the
    ///    capacity-1 offer channel keeps just the first one.
    /// 2. Answer that offer with an [`AssignRequest`] on its continuation
    ///    channel and wait for the acknowledgement.
    ///
    /// Both phases race the same deadline. The offering actor runs its own
    /// grace timer, so a late acknowledgement and a lapsed offer can cross;
    /// either way the burrow ends up consistent and the call can be retried.
    #[instrument(skip(self))]
    pub async fn rentout(&self, deadline: Duration) -> Result<Burrow, RentError> {
        let expires = deadline_from_now(deadline);
        info!("Start rentout request");

        let burrows = self.registry().await.ok_or(RentError::PoolClosed)?;
        let (respond_to, mut offers) = offer_channel();
        debug!(count = burrows.len(), "Send available request to all burrows");
        for handle in &burrows {
            handle.dispatch(BurrowRequest::Available {
                respond_to: respond_to.clone(),
            });
        }

        // `respond_to` stays alive until here so that an empty pool waits out
        // the deadline instead of failing as soon as every actor declined.
        let offer = match time::timeout_at(expires, offers.recv()).await {
            Ok(Some(offer)) => offer,
            Ok(None) | Err(_) => {
                debug!("No burrow offered before the deadline");
                return Err(RentError::NoBurrowAvailable);
            }
        };
        // Late offers fail to publish; a buffered one lapses at once.
        drop(offers);
        drop(respond_to);

        debug!(name = %offer.burrow.name, "Available burrow");
        claim(offer, expires).await
    }
}

/// Deadlines too large to represent are treated as "roughly forever".
fn deadline_from_now(deadline: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(deadline).unwrap_or_else(|| now + FAR_FUTURE)
}

/// About thirty years, as in `tokio::time`.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Second phase of a rentout: assign the offered burrow and wait for the ack.
async fn claim(offer: BurrowResponse, expires: Instant) -> Result<Burrow, RentError> {
    let name = offer.burrow.name;
    let Some(next_request) = offer.next_request else {
        return Err(RentError::AssignmentTimedOut);
    };

    let (assign, ack) = AssignRequest::new();
    if next_request.send(assign).is_err() {
        debug!(%name, "Offer lapsed before assignment");
        return Err(RentError::AssignmentTimedOut);
    }

    match time::timeout_at(expires, ack).await {
        Ok(Ok(reply)) => {
            info!(name = %reply.burrow.name, "Burrow rented out");
            Ok(reply.burrow)
        }
        Ok(Err(_)) | Err(_) => {
            debug!(%name, "Available burrow did not respond in time");
            Err(RentError::AssignmentTimedOut)
        }
    }
}

#[async_trait]
impl BurrowPool for PoolManager {
    async fn admit(&self, burrow: Burrow) -> Result<String, PoolError> {
        PoolManager::admit(self, burrow).await
    }

    async fn current_status(&self) -> Vec<Burrow> {
        PoolManager::current_status(self).await
    }

    async fn rentout(&self, deadline: Duration) -> Result<Burrow, RentError> {
        PoolManager::rentout(self, deadline).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::shutdown::shutdown_channel;

    #[tokio::test]
    async fn test_load_counts_admitted() {
        let dir = tempfile::tempdir().unwrap();
        let (_trigger, signal) = shutdown_channel();
        let pool = PoolManager::new(PoolConfig::default().with_dump_dir(dir.path()), signal);

        let (tx, rx) = mpsc::channel(4);
        tokio::spawn(async move {
            for name in ["a", "b", "a", "c"] {
                tx.send(Burrow::new(name, 1.0, 1.0, 0)).await.unwrap();
            }
        });

        assert_eq!(pool.load(rx).await, 3);
        assert_eq!(pool.current_status().await.len(), 3);
    }

    #[tokio::test]
    async fn test_done_resolves_for_every_waiter() {
        let dir = tempfile::tempdir().unwrap();
        let (trigger, signal) = shutdown_channel();
        let pool = PoolManager::new(PoolConfig::default().with_dump_dir(dir.path()), signal);
        pool.admit(Burrow::new("a", 1.0, 1.0, 0)).await.unwrap();

        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { pool.done().await })
            })
            .collect();

        trigger.send(true).unwrap();
        for waiter in waiters {
            time::timeout(Duration::from_secs(1), waiter)
                .await
                .expect("done must resolve")
                .unwrap();
        }
        assert!(pool.registry().await.is_none());
    }

    #[tokio::test]
    async fn test_unbounded_deadline_rents() {
        let dir = tempfile::tempdir().unwrap();
        let (_trigger, signal) = shutdown_channel();
        let pool = PoolManager::new(PoolConfig::default().with_dump_dir(dir.path()), signal);
        pool.admit(Burrow::new("free", 1.0, 1.0, 0)).await.unwrap();

        let rented = tokio::spawn(async move { pool.rentout(Duration::MAX).await })
            .await
            .expect("rentout must not panic")
            .unwrap();
        assert_eq!(rented.name, "free");
        assert!(rented.occupied);
    }

    #[test]
    fn test_deadline_from_now_saturates() {
        let before = Instant::now();
        assert!(deadline_from_now(Duration::MAX) >= before + FAR_FUTURE);
        assert!(deadline_from_now(Duration::from_millis(5)) >= before + Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_claim_after_offer_lapsed() {
        let config = PoolConfig::default().with_negotiation_grace(Duration::from_millis(10));
        let handle = crate::burrow_actor::spawn(Burrow::new("slow", 1.0, 1.0, 0), &config);

        let (respond_to, mut offers) = offer_channel();
        handle.send(BurrowRequest::Available { respond_to }).await.unwrap();
        let offer = offers.recv().await.unwrap();

        time::sleep(Duration::from_millis(50)).await;
        let expires = Instant::now() + Duration::from_secs(1);
        assert_eq!(claim(offer, expires).await, Err(RentError::AssignmentTimedOut));

        assert!(handle.status().await.unwrap().is_available());
    }

    #[tokio::test]
    async fn test_claim_unanswered_times_out() {
        let (next_request, _assignment) = oneshot::channel();
        let offer = BurrowResponse::offer(Burrow::new("mute", 1.0, 1.0, 0), next_request);

        let started = Instant::now();
        let expires = started + Duration::from_millis(50);
        assert_eq!(claim(offer, expires).await, Err(RentError::AssignmentTimedOut));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_dropped_trigger_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        let (trigger, signal) = shutdown_channel();
        let pool = PoolManager::new(PoolConfig::default().with_dump_dir(dir.path()), signal);

        drop(trigger);
        time::timeout(Duration::from_secs(1), pool.done())
            .await
            .expect("done must resolve");
        assert_eq!(
            pool.rentout(Duration::from_millis(10)).await,
            Err(RentError::PoolClosed)
        );
    }
}
