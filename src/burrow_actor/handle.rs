//! # Burrow Handle
//!
//! The *client* half of a burrow actor. It holds only the sender of the actor's
//! inbox, so it is cheap to clone into the manager's registry and into the
//! helper tasks of a broadcast.

use crate::framework::{fan_in_channel, BurrowRequest};
use crate::model::Burrow;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct BurrowHandle {
    name: String,
    sender: mpsc::Sender<BurrowRequest>,
}

impl BurrowHandle {
    pub fn new(name: String, sender: mpsc::Sender<BurrowRequest>) -> Self {
        Self { name, sender }
    }

    /// Name of the burrow behind this handle.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sends a request, waiting for inbox space. Fails once the actor stopped.
    pub async fn send(
        &self,
        request: BurrowRequest,
    ) -> Result<(), mpsc::error::SendError<BurrowRequest>> {
        self.sender.send(request).await
    }

    /// Sends a request from a helper task so a broadcast never waits on a busy
    /// actor. A request to a stopped actor is dropped together with its reply
    /// sender.
    pub fn dispatch(&self, request: BurrowRequest) -> JoinHandle<()> {
        let sender = self.sender.clone();
        let name = self.name.clone();
        tokio::spawn(async move {
            let kind = request.kind();
            if sender.send(request).await.is_err() {
                debug!(%name, kind, "Burrow stopped, request dropped");
            }
        })
    }

    /// Single status round trip. `None` if the actor has stopped.
    pub async fn status(&self) -> Option<Burrow> {
        let (respond_to, mut response) = fan_in_channel(1);
        self.send(BurrowRequest::Status { respond_to }).await.ok()?;
        response.recv().await.map(|reply| reply.burrow)
    }
}
