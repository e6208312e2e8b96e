use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Capability interface over a platform audio player. The session injects a
/// real playback handle when the bundled song could be started, and tests
/// inject fakes; the timeline never touches audio APIs directly.
pub trait AudioPlayback: Send + Sync {
    /// Native playback-position report, in milliseconds.
    fn position_millis(&self) -> u64;
    /// Whether the player currently reports playing.
    fn is_playing(&self) -> bool;
}

/// Simulated elapsed-time source used when no audio playback is available.
///
/// Started exactly once at session start; afterwards a ticker loop calls
/// [`FallbackClock::advance`] with the configured step. The counter is atomic
/// because it is written by the ticker loop and read by the presenter and
/// haptic loops.
#[derive(Default)]
pub struct FallbackClock {
    started: AtomicBool,
    elapsed_millis: AtomicU64,
}

impl FallbackClock {
    pub fn start(&self) {
        self.started.store(true, Ordering::Release);
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    pub fn advance(&self, step_millis: u64) {
        self.elapsed_millis.fetch_add(step_millis, Ordering::AcqRel);
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed_millis.load(Ordering::Acquire)
    }
}

impl fmt::Debug for FallbackClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackClock")
            .field("started", &self.is_started())
            .field("elapsed_millis", &self.elapsed_millis())
            .finish()
    }
}

/// Timeline source shared by every loop in the session.
///
/// The elapsed-time query prefers the audio player's own position whenever it
/// reports playing, falls back to the simulated clock once that has been
/// started, and otherwise reads 0.
pub struct Timeline {
    audio: Option<Box<dyn AudioPlayback>>,
    fallback: FallbackClock,
}

impl Timeline {
    /// Builds a timeline driven by a real playback handle.
    pub fn with_audio(audio: Box<dyn AudioPlayback>) -> Self {
        Self {
            audio: Some(audio),
            fallback: FallbackClock::default(),
        }
    }

    /// Builds a timeline with no audio; the fallback clock is started
    /// immediately and is the permanent time source for the session.
    pub fn without_audio() -> Self {
        let fallback = FallbackClock::default();
        fallback.start();
        Self {
            audio: None,
            fallback,
        }
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn fallback(&self) -> &FallbackClock {
        &self.fallback
    }

    /// Current playback position in milliseconds.
    pub fn elapsed_millis(&self) -> u64 {
        if let Some(audio) = &self.audio {
            if audio.is_playing() {
                return audio.position_millis();
            }
        }
        if self.fallback.is_started() {
            self.fallback.elapsed_millis()
        } else {
            0
        }
    }

    /// True once any time source is running; gates the haptic driver.
    pub fn is_active(&self) -> bool {
        self.audio
            .as_ref()
            .map(|audio| audio.is_playing())
            .unwrap_or(false)
            || self.fallback.is_started()
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("has_audio", &self.has_audio())
            .field("fallback", &self.fallback)
            .finish()
    }
}
