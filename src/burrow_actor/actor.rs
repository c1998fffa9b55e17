//! # Burrow Actor
//!
//! The `BurrowActor` is the *server* side of one burrow. It owns the [`Burrow`]
//! exclusively and processes its inbox sequentially, so no locks are needed.
//!
//! ## States
//!
//! * **Idle** - waits on the aging tick and on the inbox, whichever comes first.
//! * **Negotiating** - entered after an offer was published. Waits on the
//!   continuation channel and on the grace timer only; ticks and inbox requests
//!   queue up until the negotiation ends.

use crate::framework::{AssignRequest, BurrowRequest, BurrowResponse, PoolConfig};
use crate::model::Burrow;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::BurrowHandle;

/// `tokio::time::interval` rejects a zero period.
const MIN_TICK: Duration = Duration::from_millis(1);

pub struct BurrowActor {
    receiver: mpsc::Receiver<BurrowRequest>,
    burrow: Burrow,
    tick: Duration,
    negotiation_grace: Duration,
}

impl BurrowActor {
    /// Creates a new `BurrowActor` and the handle used to reach it.
    ///
    /// The actor does nothing until [`run`](Self::run) is spawned.
    pub fn new(initial: Burrow, config: &PoolConfig) -> (Self, BurrowHandle) {
        let (sender, receiver) = mpsc::channel(config.mailbox_capacity.max(1));
        let handle = BurrowHandle::new(initial.name.clone(), sender);
        let actor = Self {
            receiver,
            burrow: initial,
            tick: config.tick.max(MIN_TICK),
            negotiation_grace: config.negotiation_grace,
        };
        (actor, handle)
    }

    /// Runs the actor's event loop until a `Close` request arrives or every
    /// handle is dropped.
    pub async fn run(mut self) {
        debug!(name = %self.burrow.name, "Actor started");

        let mut pulse = time::interval_at(Instant::now() + self.tick, self.tick);
        pulse.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = pulse.tick() => self.age(),
                msg = self.receiver.recv() => match msg {
                    Some(BurrowRequest::Close { respond_to }) => {
                        info!(name = %self.burrow.name, "Close burrow");
                        let _ = respond_to
                            .send(BurrowResponse::snapshot(self.burrow.clone()))
                            .await;
                        return;
                    }
                    Some(BurrowRequest::Status { respond_to }) => {
                        let _ = respond_to
                            .send(BurrowResponse::snapshot(self.burrow.clone()))
                            .await;
                    }
                    Some(BurrowRequest::Available { respond_to }) => {
                        self.negotiate(respond_to).await;
                    }
                    None => break,
                },
            }
        }

        info!(name = %self.burrow.name, "Shutdown");
    }

    fn age(&mut self) {
        if self.burrow.is_collapsed() {
            return;
        }
        self.burrow.advance_age();
        if self.burrow.is_collapsed() {
            info!(name = %self.burrow.name, "Burrow collapsed");
        }
    }

    /// Publishes an offer if the burrow is available and, when someone took it,
    /// waits for the assignment or for the grace period to run out.
    async fn negotiate(&mut self, respond_to: mpsc::Sender<BurrowResponse>) {
        if !self.burrow.is_available() {
            return;
        }

        let (next_request, assignment) = oneshot::channel::<AssignRequest>();
        let offer = BurrowResponse::offer(self.burrow.clone(), next_request);

        // Never wait on the offer channel: full means another burrow was faster,
        // closed means the requester already gave up.
        match respond_to.try_send(offer) {
            Ok(()) => debug!(name = %self.burrow.name, "Offer published"),
            Err(TrySendError::Full(_)) | Err(TrySendError::Closed(_)) => {
                debug!(name = %self.burrow.name, "Nobody to receive my offer");
                return;
            }
        }

        tokio::select! {
            _ = time::sleep(self.negotiation_grace) => {
                debug!(name = %self.burrow.name, "Offer lapsed");
            }
            assign = assignment => match assign {
                Ok(AssignRequest { respond_to }) => {
                    self.burrow.occupied = true;
                    if respond_to
                        .send(BurrowResponse::snapshot(self.burrow.clone()))
                        .is_err()
                    {
                        // The renter stopped waiting; keep the burrow rentable.
                        self.burrow.occupied = false;
                        debug!(name = %self.burrow.name, "Assignment abandoned");
                    } else {
                        info!(name = %self.burrow.name, "Burrow rented");
                    }
                }
                Err(_) => debug!(name = %self.burrow.name, "Offer withdrawn"),
            },
        }
    }
}
