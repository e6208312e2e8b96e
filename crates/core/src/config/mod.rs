use serde::{Deserialize, Serialize};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardConfig {
    pub timing: TimingConfig,
    pub haptics: HapticsConfig,
}

/// Fixed periods driving the presentation loops, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Outer polling period of the lyric presenter.
    pub poll_period_ms: u64,
    /// Delay between revealed characters of the current cue.
    pub reveal_delay_ms: u64,
    /// Hold applied instead of a reveal when a cue has no text.
    pub empty_line_hold_ms: u64,
    /// Step and period of the simulated clock used when audio is unavailable.
    pub fallback_step_ms: u64,
    /// Period of one decorative twinkle cycle.
    pub twinkle_period_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_period_ms: 80,
            reveal_delay_ms: 40,
            empty_line_hold_ms: 300,
            fallback_step_ms: 50,
            twinkle_period_ms: 500,
        }
    }
}

/// Configuration for the haptic pulse driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HapticsConfig {
    /// Polling period of the pulse loop.
    pub pulse_period_ms: u64,
    /// Duration of a single pulse.
    pub pulse_millis: u64,
    /// Inclusive start of the activity window on the playback timeline.
    pub window_start_ms: u64,
    /// Inclusive end of the activity window on the playback timeline.
    pub window_end_ms: u64,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            pulse_period_ms: 500,
            pulse_millis: 40,
            window_start_ms: 17_000,
            window_end_ms: 250_000,
        }
    }
}
