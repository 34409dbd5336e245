mod session;

pub use session::{PlayerSession, SessionRegistry};
