/// Where a (viewer, container) pair is in the open lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpenState {
    /// The viewer never asked for the container.
    Unopened,
    /// The open arrived before the container was registered.
    PendingOpen,
    /// The viewer watches the container and received a snapshot.
    Open,
    /// The viewer closed it, or the container was despawned.
    Closed,
}
