#![allow(dead_code)]

mod messages;
mod mock_upstream;
mod recording_observer;

pub use messages::{a_reply, query_bytes, query_message};
pub use mock_upstream::{MockUpstream, UpstreamBehavior};
pub use recording_observer::RecordingObserver;
