use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

pub const DEFAULT_HALF_PERIOD: Duration = Duration::from_millis(4000);

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Sweep forward, then back.
    #[default]
    #[strum(serialize = "reverse", serialize = "pingpong", serialize = "ping-pong")]
    Reverse,
    /// Jump back to the start after every sweep.
    #[strum(serialize = "restart", serialize = "loop")]
    Restart,
}

/// Linear sweep between two values, repeated forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingPong {
    pub from: f64,
    pub to: f64,
    pub half_period: Duration,
    pub repeat: RepeatMode,
}

impl Default for PingPong {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 360.0,
            half_period: DEFAULT_HALF_PERIOD,
            repeat: RepeatMode::Reverse,
        }
    }
}

impl PingPong {
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let half = self.half_period.as_secs_f64();
        if half <= 0.0 {
            return self.from;
        }

        let t = elapsed.as_secs_f64() / half;
        let cycle = t.floor();
        let fraction = t - cycle;

        let progress = match self.repeat {
            RepeatMode::Reverse if (cycle as u64) % 2 == 1 => 1.0 - fraction,
            _ => fraction,
        };

        self.from + (self.to - self.from) * progress
    }
}

/// Tracks elapsed time against a monotonic clock in microseconds, such as
/// the GTK frame clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timeline {
    started_at: Option<i64>,
    carried: Duration,
    last: Duration,
}

impl Timeline {
    pub fn elapsed(&mut self, now_us: i64) -> Duration {
        let start = *self.started_at.get_or_insert(now_us);
        // a new frame clock may hand us an older stamp
        let running = Duration::from_micros(now_us.saturating_sub(start).max(0) as u64);
        self.last = self.carried + running;
        self.last
    }

    /// Freezes at the last reported time; the next `elapsed` call continues
    /// from there.
    pub fn suspend(&mut self) {
        self.carried = self.last;
        self.started_at = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
