//! In-memory graph writers

mod recording;

pub use recording::RecordingGraphWriter;
