//! Background [`Task`]s definitions.

mod background;
pub mod watch_live_updates;

pub use common::Handler as Task;

pub use self::{background::Background, watch_live_updates::WatchLiveUpdates};
