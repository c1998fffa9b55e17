//! # Control Loop
//!
//! The *server* half of the pool manager. It is the single writer of the actor
//! registry: admissions and registry reads are messages processed one at a time,
//! so enumerating the registry never races with a concurrent admission.

use crate::burrow_actor::{self, BurrowHandle};
use crate::framework::{fan_in_channel, BurrowRequest, PoolConfig, PoolError};
use crate::lifecycle::shutdown::cancelled;
use crate::model::Burrow;
use std::collections::HashSet;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use super::dump::write_dump;

/// Messages accepted by the control loop.
#[derive(Debug)]
pub enum ControlMessage {
    Admit {
        burrow: Burrow,
        respond_to: oneshot::Sender<Result<String, PoolError>>,
    },
    /// Read-broadcast request: reply with the handles registered right now.
    List {
        respond_to: oneshot::Sender<Vec<BurrowHandle>>,
    },
}

pub struct ControlLoop {
    receiver: mpsc::Receiver<ControlMessage>,
    burrows: Vec<BurrowHandle>,
    names: HashSet<String>,
    config: PoolConfig,
    done: watch::Sender<bool>,
}

impl ControlLoop {
    pub fn new(
        receiver: mpsc::Receiver<ControlMessage>,
        config: PoolConfig,
        done: watch::Sender<bool>,
    ) -> Self {
        Self {
            receiver,
            burrows: Vec::new(),
            names: HashSet::new(),
            config,
            done,
        }
    }

    /// Runs until `shutdown` fires (close every actor and dump) or every
    /// [`PoolManager`](super::PoolManager) is dropped (actors stop with their
    /// handles, no dump). Either way the completion signal is raised last.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        debug!("Pool manager started");

        loop {
            tokio::select! {
                _ = cancelled(&mut shutdown) => {
                    info!(size = self.burrows.len(), "Received closing signal");
                    self.close_burrows_and_dump().await;
                    break;
                }
                msg = self.receiver.recv() => match msg {
                    Some(ControlMessage::Admit { burrow, respond_to }) => {
                        let _ = respond_to.send(self.admit(burrow));
                    }
                    Some(ControlMessage::List { respond_to }) => {
                        let _ = respond_to.send(self.burrows.clone());
                    }
                    None => {
                        info!(size = self.burrows.len(), "All pool clients dropped");
                        break;
                    }
                },
            }
        }

        self.burrows.clear();
        let _ = self.done.send(true);
        info!("Pool manager shutdown complete");
    }

    fn admit(&mut self, mut burrow: Burrow) -> Result<String, PoolError> {
        if burrow.name.is_empty() {
            burrow.name = self.next_free_name();
        }
        if !self.names.insert(burrow.name.clone()) {
            warn!(name = %burrow.name, "Burrow already managed");
            return Err(PoolError::DuplicateName(burrow.name));
        }

        let name = burrow.name.clone();
        self.burrows.push(burrow_actor::spawn(burrow, &self.config));
        info!(%name, size = self.burrows.len(), "Managing new burrow");
        Ok(name)
    }

    fn next_free_name(&self) -> String {
        let mut n = self.burrows.len() + 1;
        loop {
            let name = format!("burrow_{n}");
            if !self.names.contains(&name) {
                return name;
            }
            n += 1;
        }
    }

    async fn close_burrows_and_dump(&mut self) {
        let (respond_to, mut replies) = fan_in_channel(self.burrows.len());
        for handle in &self.burrows {
            debug!(name = handle.name(), "Closing burrow");
            handle.dispatch(BurrowRequest::Close {
                respond_to: respond_to.clone(),
            });
        }
        drop(respond_to);

        let mut all = Vec::with_capacity(self.burrows.len());
        while let Some(reply) = replies.recv().await {
            all.push(reply.burrow);
        }

        match write_dump(&self.config.dump_dir, &all).await {
            Ok(path) => info!(path = %path.display(), count = all.len(), "Generated dump file"),
            Err(e) => error!(error = %e, "Dump file not created"),
        }
    }
}
