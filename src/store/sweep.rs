//! Background sweep of expired sessions.
//!
//! Runs at a fraction of the session TTL and drops records nobody read
//! before they expired.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const MIN_INTERVAL: Duration = Duration::from_secs(1);
const MAX_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Sweep interval for a given TTL: a quarter of it, clamped to [1s, 5m].
pub fn sweep_interval(ttl: Duration) -> Duration {
    (ttl / 4).clamp(MIN_INTERVAL, MAX_INTERVAL)
}

/// Start the sweep daemon loop.
pub async fn sweep_daemon(state: Arc<crate::AppState>) {
    let interval = sweep_interval(state.sessions.ttl());
    info!("Session sweep daemon started (interval: {}s)", interval.as_secs());

    loop {
        tokio::time::sleep(interval).await;
        sweep_cycle(&state).await;
    }
}

async fn sweep_cycle(state: &crate::AppState) {
    if state.sessions.is_empty().await {
        return;
    }

    let dropped = state.sessions.purge_expired().await;
    if dropped > 0 {
        let remaining = state.sessions.len().await;
        info!(
            dropped,
            remaining,
            "Swept expired sessions"
        );
    } else {
        debug!("No expired sessions");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_interval_is_clamped() {
        assert_eq!(sweep_interval(Duration::from_secs(2)), MIN_INTERVAL);
        assert_eq!(sweep_interval(Duration::from_secs(60)), Duration::from_secs(15));
        assert_eq!(sweep_interval(Duration::from_secs(86_400)), MAX_INTERVAL);
    }
}
