mod view_service;
mod watcher_index;

pub use view_service::ViewService;
pub use watcher_index::WatcherIndex;
