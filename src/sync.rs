//! Auto-sync scheduling. Timers here are armed deadlines drained by the
//! event loop, never background threads, so disarming is a plain field
//! write and nothing can fire after the guard drops.

use std::time::{Duration, Instant};

use tracing::debug;

/// Selectable refresh intervals, in milliseconds.
pub const INTERVAL_CHOICES_MS: &[u64] = &[10_000, 30_000, 60_000, 300_000];
pub const DEFAULT_INTERVAL_MS: u64 = 30_000;

/// How long the visible "Syncing..." indicator stays up after a manual sync.
pub const FLASH_MS: u64 = 800;

/// Recurring silent refresh of the node records. Fires only while `enabled`
/// and the guard view is active; any eligibility or interval change drops
/// the armed deadline before optionally arming a fresh one.
pub struct AutoSync {
    pub enabled: bool,
    interval: Duration,
    next_due: Option<Instant>,
}

impl AutoSync {
    pub fn new() -> Self {
        AutoSync {
            enabled: false,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            next_due: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval.as_millis() as u64
    }

    pub fn toggle(&mut self, now: Instant, guard: bool) {
        self.enabled = !self.enabled;
        debug!(enabled = self.enabled, "auto-sync toggled");
        self.rearm(now, guard);
    }

    /// Step to the next interval choice. Takes effect immediately: the old
    /// deadline is dropped so nothing fires on the stale interval.
    pub fn cycle_interval(&mut self, now: Instant, guard: bool) {
        let ms = self.interval_ms();
        let idx = INTERVAL_CHOICES_MS.iter().position(|&c| c == ms).unwrap_or(0);
        let next = INTERVAL_CHOICES_MS[(idx + 1) % INTERVAL_CHOICES_MS.len()];
        self.interval = Duration::from_millis(next);
        self.rearm(now, guard);
    }

    /// Tear down the previous deadline and, if still eligible, arm a fresh
    /// one measured from `now`.
    pub fn rearm(&mut self, now: Instant, guard: bool) {
        self.next_due = if self.enabled && guard {
            Some(now + self.interval)
        } else {
            None
        };
    }

    /// Advance the schedule. Returns true when a silent refresh is due;
    /// the next deadline is measured from the fire instant.
    pub fn tick(&mut self, now: Instant, guard: bool) -> bool {
        if !(self.enabled && guard) {
            self.next_due = None;
            return false;
        }
        match self.next_due {
            None => {
                // Became eligible without an armed deadline (e.g. the guard
                // view was just entered); arm without firing.
                self.next_due = Some(now + self.interval);
                false
            }
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            Some(_) => false,
        }
    }

    #[cfg(test)]
    fn armed(&self) -> bool {
        self.next_due.is_some()
    }
}

/// One-shot UI indicator for the manually triggered sync. Shares no state
/// with the recurring scheduler.
pub struct SyncFlash {
    until: Option<Instant>,
}

impl SyncFlash {
    pub fn new() -> Self {
        SyncFlash { until: None }
    }

    pub fn raise(&mut self, now: Instant) {
        self.until = Some(now + Duration::from_millis(FLASH_MS));
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(t) = self.until {
            if now >= t {
                self.until = None;
            }
        }
    }

    pub fn active(&self) -> bool {
        self.until.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_sync(now: Instant) -> AutoSync {
        let mut s = AutoSync::new();
        s.toggle(now, true);
        s
    }

    #[test]
    fn fires_each_interval_while_eligible() {
        let t0 = Instant::now();
        let mut s = enabled_sync(t0);
        let step = Duration::from_millis(DEFAULT_INTERVAL_MS);
        assert!(!s.tick(t0 + step / 2, true));
        assert!(s.tick(t0 + step, true));
        // Re-armed from the fire instant, not the original deadline.
        assert!(!s.tick(t0 + step + step / 2, true));
        assert!(s.tick(t0 + step * 2, true));
    }

    #[test]
    fn disabled_never_fires() {
        let t0 = Instant::now();
        let mut s = AutoSync::new();
        assert!(!s.tick(t0 + Duration::from_secs(3600), true));
        assert!(!s.armed());
    }

    #[test]
    fn guard_drop_disarms_immediately() {
        let t0 = Instant::now();
        let mut s = enabled_sync(t0);
        assert!(s.armed());
        assert!(!s.tick(t0 + Duration::from_secs(60), false));
        assert!(!s.armed());
        // Back on the guard view: arms fresh, does not fire on the stale deadline.
        assert!(!s.tick(t0 + Duration::from_secs(61), true));
        assert!(s.armed());
    }

    #[test]
    fn toggle_off_disarms() {
        let t0 = Instant::now();
        let mut s = enabled_sync(t0);
        s.toggle(t0, true);
        assert!(!s.enabled);
        assert!(!s.armed());
    }

    #[test]
    fn interval_change_rearms_with_new_duration() {
        let t0 = Instant::now();
        let mut s = enabled_sync(t0);
        assert_eq!(s.interval_ms(), 30_000);
        s.cycle_interval(t0, true);
        assert_eq!(s.interval_ms(), 60_000);
        // The old 30s deadline must not fire.
        assert!(!s.tick(t0 + Duration::from_millis(30_000), true));
        assert!(s.tick(t0 + Duration::from_millis(60_000), true));
    }

    #[test]
    fn interval_choices_wrap_around() {
        let t0 = Instant::now();
        let mut s = AutoSync::new();
        for _ in 0..INTERVAL_CHOICES_MS.len() {
            s.cycle_interval(t0, false);
        }
        assert_eq!(s.interval_ms(), DEFAULT_INTERVAL_MS);
    }

    #[test]
    fn flash_expires_after_window() {
        let t0 = Instant::now();
        let mut f = SyncFlash::new();
        assert!(!f.active());
        f.raise(t0);
        assert!(f.active());
        f.tick(t0 + Duration::from_millis(FLASH_MS - 1));
        assert!(f.active());
        f.tick(t0 + Duration::from_millis(FLASH_MS));
        assert!(!f.active());
    }
}
