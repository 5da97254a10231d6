//! The decision loop: poll, decide, act, wait, repeat.
//!
//! The pure part is `decide`: one tick snapshot in, one action out. The
//! `Monitor` wraps it with the two fetches and the single command, and
//! owns the only cross-tick state there is, the accumulated idle time.
//! This is a level-triggered poller: every tick recomputes everything
//! from scratch except that accumulator.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::jellyfin::JellyfinClient;
use crate::model::{Action, TickSnapshot, any_active};
use crate::sabnzbd::SabClient;

/// Outcome of one decision: the action to take and the idle time to carry
/// into the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub idle: Duration,
}

/// Decide what this tick does.
///
/// Rules, in precedence order:
/// 1. A manual speed cap on the download client means the user wants
///    downloads to keep flowing; emit nothing, whatever playback says.
/// 2. Someone is watching: reset the idle clock, pause the queue unless
///    it already is paused.
/// 3. Nobody is watching: accumulate idle time; once it reaches the
///    cooldown and the queue is actually paused, resume and reset.
///
/// A cooldown of zero makes Resume eligible on the very first idle tick.
pub fn decide(
    snap: &TickSnapshot,
    idle: Duration,
    interval: Duration,
    cooldown: Duration,
) -> Decision {
    if snap.override_active {
        return Decision {
            action: Action::NoOp,
            idle,
        };
    }

    if snap.active {
        let action = if snap.queue_paused {
            Action::NoOp
        } else {
            Action::Pause
        };
        return Decision {
            action,
            idle: Duration::ZERO,
        };
    }

    let idle = idle + interval;
    if idle >= cooldown && snap.queue_paused {
        Decision {
            action: Action::Resume,
            idle: Duration::ZERO,
        }
    } else {
        Decision {
            action: Action::NoOp,
            idle,
        }
    }
}

/// The tick loop. Runs until the shutdown Notify fires.
pub struct Monitor {
    jellyfin: JellyfinClient,
    sab: SabClient,
    interval: Duration,
    cooldown: Duration,
    include_paused: bool,
    shutdown: Arc<Notify>,
    idle: Duration,
}

impl Monitor {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            jellyfin: JellyfinClient::new(config)?,
            sab: SabClient::new(config)?,
            interval: config.interval,
            cooldown: config.resume_cooldown,
            include_paused: config.include_paused,
            shutdown: Arc::new(Notify::new()),
            idle: Duration::ZERO,
        })
    }

    /// Handle for signal tasks to request shutdown.
    pub fn shutdown_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.shutdown)
    }

    /// Run the loop until shutdown. A failed tick is logged and skipped;
    /// the next scheduled tick is the retry mechanism.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            cooldown_secs = self.cooldown.as_secs(),
            include_paused = self.include_paused,
            "starting polling"
        );

        loop {
            if let Err(e) = self.tick().await {
                warn!("tick skipped: {e}");
            }

            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("shutdown requested, exiting");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    /// Accumulated idle time carried across ticks.
    pub fn idle(&self) -> Duration {
        self.idle
    }

    /// One poll-decide-act pass. Any error propagates before the idle
    /// accumulator is updated, so a failed fetch or command leaves the
    /// loop state exactly as it was.
    pub async fn tick(&mut self) -> Result<()> {
        let sessions = self.jellyfin.sessions().await?;
        for s in sessions.iter().filter(|s| s.now_playing_item.is_some()) {
            debug!(
                user = s.user_name.as_deref().unwrap_or("-"),
                client = s.client.as_deref().unwrap_or("-"),
                item = s
                    .now_playing_item
                    .as_ref()
                    .and_then(|i| i.name.as_deref())
                    .unwrap_or("-"),
                playing = s.is_playing(),
                paused = s.paused(),
                buffering = s.buffering(),
                watching = s.is_watching(self.include_paused),
                "session"
            );
        }
        let active = any_active(&sessions, self.include_paused);

        let queue = self.sab.queue_state().await?;
        debug!(
            active,
            queue_paused = queue.paused,
            speed_limit = queue.speed_limit,
            speed_kbps = queue.speed_kbps,
            idle_secs = self.idle.as_secs(),
            "tick state"
        );

        let snap = TickSnapshot {
            active,
            override_active: queue.override_active(),
            queue_paused: queue.paused,
        };
        if snap.override_active && snap.active {
            info!(
                speed_limit = queue.speed_limit,
                "user override: speed cap set, skipping auto-pause"
            );
        }

        let decision = decide(&snap, self.idle, self.interval, self.cooldown);
        match decision.action {
            Action::Pause => {
                self.sab.pause().await?;
                info!("paused downloads due to active playback");
            }
            Action::Resume => {
                self.sab.resume().await?;
                info!("idle threshold reached, resuming downloads");
            }
            Action::NoOp => {
                debug!(idle_secs = decision.idle.as_secs(), "no action");
            }
        }
        self.idle = decision.idle;

        Ok(())
    }
}
