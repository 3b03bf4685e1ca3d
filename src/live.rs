//! Simulated live-update ticker.
//!
//! Periodically emits a `live-metrics` event with the base message count for
//! the active range plus bounded jitter. Cosmetic only: no ordering or
//! consistency guarantee across ticks, nothing is stored.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tauri::{AppHandle, Emitter};

use crate::services::analytics::live_message_count;
use crate::state::AppState;
use crate::types::{LiveMetrics, RangeKey};

/// Tick interval for the simulated feed.
const TICK_SECS: u64 = 5;

/// Maximum absolute jitter applied per tick.
const JITTER: i64 = 3;

/// Compute one tick's displayed count. Jitter never drives the count
/// negative.
pub fn jittered_count(range: RangeKey, jitter: i64) -> u32 {
    let base = live_message_count(range) as i64;
    base.saturating_add(jitter).max(0) as u32
}

/// Run the ticker until the app exits. Paused while the overview page has
/// real-time updates switched off.
pub async fn run_live_ticker(state: Arc<AppState>, app: AppHandle) {
    let mut interval = tokio::time::interval(Duration::from_secs(TICK_SECS));
    loop {
        interval.tick().await;

        let (enabled, range) = match state.overview.lock() {
            Ok(guard) => (guard.real_time_enabled, guard.selected_range),
            Err(_) => continue,
        };
        if !enabled {
            continue;
        }

        let jitter = rand::thread_rng().gen_range(-JITTER..=JITTER);
        let payload = LiveMetrics {
            range,
            message_count: jittered_count(range, jitter),
        };
        if let Err(e) = app.emit("live-metrics", &payload) {
            log::debug!("live-metrics emit failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_stays_within_band() {
        for jitter in -JITTER..=JITTER {
            let count = jittered_count(RangeKey::Today, jitter);
            let base = live_message_count(RangeKey::Today) as i64;
            assert!((count as i64 - base).abs() <= JITTER);
        }
    }

    #[test]
    fn test_jitter_never_underflows() {
        assert_eq!(jittered_count(RangeKey::Today, -1000), 0);
    }
}
