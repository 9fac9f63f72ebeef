//! Meeting session lifecycle
//!
//! `SessionRegistry` owns the state machine: meetings are created in
//! `recording`, transition exactly once to `completed` with their transcript,
//! summary, and agenda committed atomically, and are never deleted. Chunk
//! counts are derived from the chunk store on every read.

mod registry;

pub use registry::{Meeting, MeetingOverview, SessionRegistry};
