//! Wire-format tests: Jellyfin session JSON and SABnzbd queue JSON.

use jellygate::model::{PlaybackSession, QueueResponse, QueueState, any_active};

// ---------------------------------------------------------------------------
// Jellyfin sessions
// ---------------------------------------------------------------------------

#[test]
fn jellyfin_sessions_deserialize() {
    let body = r#"[
        {
            "UserName": "alice",
            "Client": "Jellyfin Web",
            "DeviceName": "Firefox",
            "NowPlayingItem": {"Name": "Big Buck Bunny", "Id": "abc123"},
            "PlayState": {"IsPaused": false, "IsBuffering": false, "CanSeek": true}
        },
        {
            "UserName": "bob",
            "Client": "Android TV",
            "PlayState": {"CanSeek": false}
        }
    ]"#;

    let sessions: Vec<PlaybackSession> = serde_json::from_str(body).unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions[0].is_playing());
    assert!(sessions[1].now_playing_item.is_none());
    assert!(!sessions[1].is_watching(true));
    assert!(any_active(&sessions, false));
}

#[test]
fn jellyfin_session_without_play_state_defaults_to_playing() {
    let body = r#"[{"NowPlayingItem": {"Name": "Something"}}]"#;
    let sessions: Vec<PlaybackSession> = serde_json::from_str(body).unwrap();
    assert!(sessions[0].is_playing());
}

#[test]
fn jellyfin_paused_and_video_paused_flags() {
    let body = r#"[
        {"NowPlayingItem": {"Name": "A"}, "PlayState": {"IsPaused": true}},
        {"NowPlayingItem": {"Name": "B"}, "PlayState": {"IsVideoPaused": true}}
    ]"#;
    let sessions: Vec<PlaybackSession> = serde_json::from_str(body).unwrap();
    assert!(sessions.iter().all(|s| s.paused()));
    assert!(!any_active(&sessions, false));
    assert!(any_active(&sessions, true));
}

#[test]
fn jellyfin_empty_session_list() {
    let sessions: Vec<PlaybackSession> = serde_json::from_str("[]").unwrap();
    assert!(!any_active(&sessions, true));
}

// ---------------------------------------------------------------------------
// SABnzbd queue
// ---------------------------------------------------------------------------

fn queue_state(body: &str) -> Result<QueueState, jellygate::error::Error> {
    let resp: QueueResponse = serde_json::from_str(body).unwrap();
    QueueState::try_from(resp)
}

#[test]
fn sab_queue_downloading_no_cap() {
    let state = queue_state(
        r#"{"queue": {
            "paused": false,
            "status": "Downloading",
            "kbpersec": "1234.56",
            "speedlimit": "100",
            "speedlimit_abs": ""
        }}"#,
    )
    .unwrap();
    assert!(!state.paused);
    assert!(!state.override_active());
    assert!((state.speed_kbps - 1234.56).abs() < 1e-6);
}

#[test]
fn sab_queue_with_absolute_speed_cap_is_override() {
    let state = queue_state(
        r#"{"queue": {
            "paused": false,
            "status": "Downloading",
            "kbpersec": "0.00",
            "speedlimit_abs": "9437184.0"
        }}"#,
    )
    .unwrap();
    assert!(state.override_active());
    assert!((state.speed_limit - 9437184.0).abs() < 1e-6);
}

#[test]
fn sab_queue_paused_flag_missing_falls_back_to_status() {
    let state = queue_state(r#"{"queue": {"status": "Paused"}}"#).unwrap();
    assert!(state.paused);

    let state = queue_state(r#"{"queue": {"status": "Idle"}}"#).unwrap();
    assert!(!state.paused);
}

#[test]
fn sab_queue_without_paused_flag_or_status_is_an_error() {
    assert!(queue_state(r#"{"queue": {"kbpersec": "0.00"}}"#).is_err());
    assert!(queue_state(r#"{"queue": {"status": ""}}"#).is_err());
}

#[test]
fn sab_numeric_fields_accept_numbers_and_garbage_reads_as_zero() {
    let state = queue_state(
        r#"{"queue": {"paused": true, "kbpersec": 42.5, "speedlimit_abs": "not a number"}}"#,
    )
    .unwrap();
    assert!(state.paused);
    assert!((state.speed_kbps - 42.5).abs() < 1e-6);
    assert!(!state.override_active());
}
