use coffer_shared::ContainerId;

use super::{TestClient, TestServer};

/// True when the client's cached snapshot equals the server's container,
/// version included.
pub fn client_mirrors_server(server: &TestServer, client: &TestClient, id: &ContainerId) -> bool {
    match (server.server.container(id), client.client.snapshot(id)) {
        (Some(container), Some(snapshot)) => container.snapshot() == *snapshot,
        _ => false,
    }
}

/// Assert that the client's mirror of a container matches the server
#[macro_export]
macro_rules! assert_mirrors_server {
    ($server:expr, $client:expr, $id:expr) => {
        assert!(
            $crate::client_mirrors_server(&$server, &$client, &$id),
            "client {:?} does not mirror container {}: server {:?}, client {:?}",
            $client.player,
            $id,
            $server.server.container(&$id).map(|container| container.snapshot()),
            $client.client.snapshot(&$id)
        );
    };
}

/// Assert that the last acknowledgement the client saw was a refusal with
/// the given reason
#[macro_export]
macro_rules! assert_refused {
    ($client:expr, $reason:expr) => {
        assert_eq!(
            $client.last_ack(),
            Some((false, $reason.to_string())),
            "expected a refusal with reason {:?}",
            $reason
        );
    };
}
