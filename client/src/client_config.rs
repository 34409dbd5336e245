use std::{default::Default, time::Duration};

/// Contains Config properties which will be used by the Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// How long a request may wait for its acknowledgement before its
    /// callback is invoked with a `timeout` refusal. `None` waits forever.
    pub operation_timeout: Option<Duration>,
    /// How many requests may be queued before the local player is bound.
    pub max_deferred_requests: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            operation_timeout: Some(Duration::from_secs(10)),
            max_deferred_requests: 32,
        }
    }
}
