//! In-process transport.
//!
//! Records every message sent through its connections and answers
//! `receive` from a reply queue or a responder closure. Used for dry runs
//! and tests.

use crate::error::{Error, Result};
use crate::transport::{select_port, SysExConnection, SysExTransport};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type Responder = Box<dyn FnMut(&[u8]) -> Option<Vec<u8>> + Send>;

#[derive(Default)]
struct MemoryState {
    sent: Vec<Vec<u8>>,
    replies: VecDeque<Vec<u8>>,
    responder: Option<Responder>,
    /// Sends allowed before every further send fails
    send_budget: Option<usize>,
}

/// Loopback transport. Clones share the same recorded state.
#[derive(Clone)]
pub struct MemoryTransport {
    ports: Vec<String>,
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::with_ports(["Memory"])
    }

    pub fn with_ports<I, S>(ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ports: ports.into_iter().map(Into::into).collect(),
            state: Arc::new(Mutex::new(MemoryState::default())),
        }
    }

    /// Every message sent so far, in order.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state.lock().sent.clone()
    }

    pub fn clear_sent(&self) {
        self.state.lock().sent.clear();
    }

    /// Queue a message for the next `receive`.
    pub fn queue_reply(&self, message: impl Into<Vec<u8>>) {
        self.state.lock().replies.push_back(message.into());
    }

    /// Answer sent messages with `responder`; its replies are queued.
    pub fn set_responder<F>(&self, responder: F)
    where
        F: FnMut(&[u8]) -> Option<Vec<u8>> + Send + 'static,
    {
        self.state.lock().responder = Some(Box::new(responder));
    }

    /// Let `count` more sends succeed, then fail every send after.
    pub fn fail_after(&self, count: usize) {
        self.state.lock().send_budget = Some(count);
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SysExTransport for MemoryTransport {
    type Connection = MemoryConnection;

    fn list_ports(&self) -> Result<Vec<String>> {
        Ok(self.ports.clone())
    }

    fn open(&self, port_name: &str) -> Result<MemoryConnection> {
        if self.ports.is_empty() {
            return Err(Error::NoPorts);
        }
        let (_, name) = select_port(&self.ports, port_name)
            .ok_or_else(|| Error::PortNotFound(port_name.to_string()))?;
        debug!("Opened memory port {}", name);
        Ok(MemoryConnection {
            port_name: name.to_string(),
            state: Arc::clone(&self.state),
            closed: false,
        })
    }
}

pub struct MemoryConnection {
    port_name: String,
    state: Arc<Mutex<MemoryState>>,
    closed: bool,
}

impl SysExConnection for MemoryConnection {
    fn port_name(&self) -> &str {
        &self.port_name
    }

    fn send(&mut self, message: &[u8]) -> Result<()> {
        if self.closed {
            return Err(Error::Closed);
        }
        let mut state = self.state.lock();
        if let Some(budget) = state.send_budget.as_mut() {
            if *budget == 0 {
                return Err(Error::Send("memory transport send limit reached".to_string()));
            }
            *budget -= 1;
        }

        state.sent.push(message.to_vec());
        let reply = state.responder.as_mut().and_then(|respond| respond(message));
        if let Some(reply) = reply {
            state.replies.push_back(reply);
        }
        Ok(())
    }

    fn receive(&mut self) -> Result<Vec<u8>> {
        if self.closed {
            return Err(Error::Closed);
        }
        self.state
            .lock()
            .replies
            .pop_front()
            .ok_or(Error::Timeout(Duration::ZERO))
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
