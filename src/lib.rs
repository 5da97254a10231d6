//! # jellygate
//!
//! Sidecar loop that pauses SABnzbd while anyone is streaming from
//! Jellyfin, and resumes it once playback has been idle for a cooldown.
//!
//! One poll tick: fetch Jellyfin sessions, fetch SABnzbd queue state,
//! decide on exactly one of pause/resume/nothing, sleep, repeat.

pub mod config;
pub mod engine;
pub mod error;
pub mod jellyfin;
pub mod model;
pub mod sabnzbd;
pub mod telemetry;
