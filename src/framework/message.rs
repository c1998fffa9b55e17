//! # Protocol Messages
//!
//! The request/response vocabulary exchanged between the pool manager and the
//! burrow actors. The capacity of each reply channel is part of the protocol:
//!
//! | Request     | Reply channel                    | Effect |
//! |-------------|----------------------------------|-----|
//! | `Status`    | shared, sized to the actor count | fan-in without stalling any actor |
//! | `Available` | shared, capacity **1**           | first offer wins, later ones are dropped |
//! | `Close`     | shared, sized to the actor count | collect final snapshots on shutdown |
//! | Assign      | `oneshot`, private               | rendezvous with exactly one actor |
//!
//! Assign is not a variant of [`BurrowRequest`]: it can only travel over the
//! continuation channel handed out inside an offer, so an actor can never receive
//! one on its shared inbox.

use crate::model::Burrow;
use tokio::sync::{mpsc, oneshot};

/// Capacity of the channel collecting availability offers.
pub const OFFER_CAPACITY: usize = 1;

/// Channel an offering actor hands out to receive the matching [`AssignRequest`].
pub type Continuation = oneshot::Sender<AssignRequest>;

/// Reply from a burrow actor.
///
/// `next_request` is only set on an availability offer. The requester must use it
/// to send an [`AssignRequest`] back to the same actor before the offer lapses.
#[derive(Debug)]
pub struct BurrowResponse {
    pub burrow: Burrow,
    pub next_request: Option<Continuation>,
}

impl BurrowResponse {
    /// A plain snapshot reply.
    pub fn snapshot(burrow: Burrow) -> Self {
        Self {
            burrow,
            next_request: None,
        }
    }

    /// An availability offer carrying its continuation channel.
    pub fn offer(burrow: Burrow, next_request: Continuation) -> Self {
        Self {
            burrow,
            next_request: Some(next_request),
        }
    }
}

/// Requests accepted on a burrow actor's inbox.
///
/// Requests are cloned into every actor during a broadcast, so they all share the
/// same reply channel.
#[derive(Debug, Clone)]
pub enum BurrowRequest {
    /// Reply with the current snapshot.
    Status {
        respond_to: mpsc::Sender<BurrowResponse>,
    },
    /// Publish an offer if available, without ever blocking on the reply.
    Available {
        respond_to: mpsc::Sender<BurrowResponse>,
    },
    /// Reply with the final snapshot and stop.
    Close {
        respond_to: mpsc::Sender<BurrowResponse>,
    },
}

impl BurrowRequest {
    /// Name of the request kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BurrowRequest::Status { .. } => "status",
            BurrowRequest::Available { .. } => "available",
            BurrowRequest::Close { .. } => "close",
        }
    }
}

/// Second phase of an allocation: take the offered burrow.
#[derive(Debug)]
pub struct AssignRequest {
    pub respond_to: oneshot::Sender<BurrowResponse>,
}

impl AssignRequest {
    /// Creates the request and the receiver for its acknowledgement.
    pub fn new() -> (Self, oneshot::Receiver<BurrowResponse>) {
        let (respond_to, response) = oneshot::channel();
        (Self { respond_to }, response)
    }
}

/// Reply channel for a `Status` or `Close` broadcast to `count` actors.
pub fn fan_in_channel(
    count: usize,
) -> (mpsc::Sender<BurrowResponse>, mpsc::Receiver<BurrowResponse>) {
    mpsc::channel(count.max(1))
}

/// Reply channel for an `Available` broadcast.
pub fn offer_channel() -> (mpsc::Sender<BurrowResponse>, mpsc::Receiver<BurrowResponse>) {
    mpsc::channel(OFFER_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::error::TrySendError;

    #[tokio::test]
    async fn test_offer_channel_keeps_only_first() {
        let (tx, mut rx) = offer_channel();

        let (first, _first_rx) = oneshot::channel();
        let (second, _second_rx) = oneshot::channel();
        assert!(tx
            .try_send(BurrowResponse::offer(Burrow::new("first", 1.0, 1.0, 0), first))
            .is_ok());
        assert!(matches!(
            tx.try_send(BurrowResponse::offer(Burrow::new("second", 1.0, 1.0, 0), second)),
            Err(TrySendError::Full(_))
        ));

        let offer = rx.recv().await.unwrap();
        assert_eq!(offer.burrow.name, "first");
        assert!(offer.next_request.is_some());
    }

    #[tokio::test]
    async fn test_assign_round_trip() {
        let (request, response) = AssignRequest::new();
        request
            .respond_to
            .send(BurrowResponse::snapshot(Burrow::new("b", 0.0, 0.0, 0).occupied()))
            .unwrap();

        let reply = response.await.unwrap();
        assert!(reply.burrow.occupied);
        assert!(reply.next_request.is_none());
    }

    #[test]
    fn test_fan_in_never_zero_capacity() {
        let (tx, _rx) = fan_in_channel(0);
        assert_eq!(tx.max_capacity(), 1);
    }
}
