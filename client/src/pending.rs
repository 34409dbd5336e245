use std::{
    collections::{HashMap, VecDeque},
    time::{Duration, Instant},
};

use log::{debug, warn};

use coffer_shared::ClientRequestId;

/// Invoked once with the outcome of a request: `ok` and the server's message.
pub type AckCallback = Box<dyn FnOnce(bool, &str) + Send>;

pub const TIMEOUT_MESSAGE: &str = "timeout";

/// Requests sent to the server that are still waiting for their
/// acknowledgement.
///
/// Every callback is invoked exactly once: by the matching ack, by
/// [`PendingOperations::expire`], or never again once it has run.
pub struct PendingOperations {
    callbacks: HashMap<ClientRequestId, AckCallback>,
    sent: VecDeque<(Instant, ClientRequestId)>,
    timeout: Option<Duration>,
    next_id: ClientRequestId,
}

impl PendingOperations {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            callbacks: HashMap::new(),
            sent: VecDeque::new(),
            timeout,
            next_id: 1,
        }
    }

    /// Reserves a fresh request id. Zero is never handed out.
    pub fn next_request_id(&mut self) -> ClientRequestId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn insert(&mut self, now: Instant, request_id: ClientRequestId, callback: AckCallback) {
        if self.callbacks.insert(request_id, callback).is_some() {
            warn!("request {} was already pending, replacing its callback", request_id);
        }
        // only `expire` reads the send times
        if self.timeout.is_some() {
            self.sent.push_back((now, request_id));
        }
    }

    /// Drops a request without invoking its callback.
    pub fn forget(&mut self, request_id: ClientRequestId) -> bool {
        let forgotten = self.callbacks.remove(&request_id).is_some();
        self.prune_sent();
        forgotten
    }

    pub fn is_pending(&self, request_id: ClientRequestId) -> bool {
        self.callbacks.contains_key(&request_id)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Runs the callback of `request_id`. Returns false for unknown or
    /// already completed requests.
    pub fn complete(&mut self, request_id: ClientRequestId, ok: bool, message: &str) -> bool {
        let Some(callback) = self.callbacks.remove(&request_id) else {
            debug!("ack for request {} that is not pending", request_id);
            return false;
        };
        self.prune_sent();
        callback(ok, message);
        true
    }

    /// Drops queued send times of requests that are no longer pending, up to
    /// the oldest one still waiting.
    fn prune_sent(&mut self) {
        while let Some((_, request_id)) = self.sent.front() {
            if self.callbacks.contains_key(request_id) {
                break;
            }
            self.sent.pop_front();
        }
    }

    /// Fails every request sent at least `timeout` before `now`. Returns the
    /// ids that timed out.
    pub fn expire(&mut self, now: Instant) -> Vec<ClientRequestId> {
        let mut expired = Vec::new();
        let Some(timeout) = self.timeout else {
            return expired;
        };

        while let Some((sent_at, request_id)) = self.sent.front().copied() {
            // entries are queued in send order
            if now.saturating_duration_since(sent_at) < timeout {
                break;
            }
            self.sent.pop_front();
            if self.complete(request_id, false, TIMEOUT_MESSAGE) {
                expired.push(request_id);
            }
        }

        if !expired.is_empty() {
            warn!("{} requests timed out", expired.len());
        }
        expired
    }
}
