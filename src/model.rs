//! Core data model.
//!
//! Everything here is ephemeral: sessions and queue state are rebuilt from
//! scratch on every poll tick, and no identity is carried across ticks.
//! The accumulated idle time is the only state the loop keeps.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Jellyfin sessions
// ---------------------------------------------------------------------------

/// One playback context as reported by Jellyfin's `/Sessions` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaybackSession {
    pub user_name: Option<String>,
    pub client: Option<String>,
    /// Present iff the session has something loaded for playback.
    pub now_playing_item: Option<NowPlayingItem>,
    #[serde(default)]
    pub play_state: PlayState,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NowPlayingItem {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayState {
    #[serde(default)]
    pub is_paused: bool,
    /// Emby-era variant of the paused flag; some clients still set it.
    #[serde(default)]
    pub is_video_paused: bool,
    #[serde(default)]
    pub is_buffering: bool,
}

impl PlaybackSession {
    pub fn paused(&self) -> bool {
        self.play_state.is_paused || self.play_state.is_video_paused
    }

    pub fn buffering(&self) -> bool {
        self.play_state.is_buffering
    }

    /// An item is loaded and it is neither paused nor buffering.
    pub fn is_playing(&self) -> bool {
        self.now_playing_item.is_some() && !self.paused() && !self.buffering()
    }

    /// Whether this session counts as someone watching. With
    /// `include_paused`, paused/buffering sessions count too.
    pub fn is_watching(&self, include_paused: bool) -> bool {
        if self.now_playing_item.is_none() {
            return false;
        }
        self.is_playing() || (include_paused && (self.paused() || self.buffering()))
    }
}

/// True iff at least one session counts as active playback.
pub fn any_active(sessions: &[PlaybackSession], include_paused: bool) -> bool {
    sessions.iter().any(|s| s.is_watching(include_paused))
}

// ---------------------------------------------------------------------------
// SABnzbd queue
// ---------------------------------------------------------------------------

/// SABnzbd `mode=queue` response envelope.
#[derive(Debug, Deserialize)]
pub struct QueueResponse {
    #[serde(default)]
    pub queue: RawQueue,
}

/// The queue object as SABnzbd sends it. Numeric fields arrive as strings
/// ("0.00", "9437184"), the paused flag is sometimes absent with only a
/// status text, so everything stays loose here and gets normalized below.
#[derive(Debug, Default, Deserialize)]
pub struct RawQueue {
    pub paused: Option<bool>,
    pub status: Option<String>,
    pub speedlimit_abs: Option<Value>,
    pub kbpersec: Option<Value>,
}

/// Normalized queue state used by the decision loop.
#[derive(Debug, Clone, Copy)]
pub struct QueueState {
    /// Global pause flag of the download client.
    pub paused: bool,
    /// Absolute speed limit in KB/s; 0 means no cap is set.
    pub speed_limit: f64,
    /// Current download speed in KB/s, for debug logging only.
    pub speed_kbps: f64,
}

impl QueueState {
    /// A non-zero speed cap is explicit user intent to keep downloading;
    /// the loop must not touch the pause toggle while it is set.
    pub fn override_active(&self) -> bool {
        self.speed_limit > 0.0
    }
}

impl TryFrom<QueueResponse> for QueueState {
    type Error = Error;

    fn try_from(resp: QueueResponse) -> Result<Self> {
        let q = resp.queue;
        let paused = match q.paused {
            Some(flag) => flag,
            None => match q.status.as_deref().filter(|s| !s.is_empty()) {
                Some(status) => status.eq_ignore_ascii_case("paused"),
                None => {
                    return Err(Error::Response(
                        "queue state has neither a paused flag nor a status".to_string(),
                    ));
                }
            },
        };
        Ok(Self {
            paused,
            speed_limit: lossy_f64(q.speedlimit_abs.as_ref()),
            speed_kbps: lossy_f64(q.kbpersec.as_ref()),
        })
    }
}

/// SABnzbd serializes numbers as strings, and leaves `speedlimit_abs`
/// empty when no cap is set. Anything unparseable reads as 0.
fn lossy_f64(v: Option<&Value>) -> f64 {
    match v {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Tick snapshot + action
// ---------------------------------------------------------------------------

/// Everything the decision function needs, captured once per tick.
#[derive(Debug, Clone, Copy)]
pub struct TickSnapshot {
    /// Is anyone actively watching.
    pub active: bool,
    /// Has the user set a manual speed cap on the download client.
    pub override_active: bool,
    /// The download client's current global pause flag.
    pub queue_paused: bool,
}

/// At most one of these is issued per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pause,
    Resume,
    NoOp,
}
