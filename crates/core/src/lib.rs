//! Core library for the animated holiday greeting card.
//!
//! The crate models the card as three small cooperating pieces sharing one
//! elapsed-time source: a [`Timeline`] fed by real audio playback or a
//! simulated fallback clock, a [`LyricPresenter`] that walks a fixed
//! [`CueSheet`] with a typewriter reveal, and a [`PulseDriver`] that emits
//! haptic pulses while the song is in its lyric window. The `tree` and
//! `render` modules produce the purely decorative twinkling tree and the
//! composed text frames a surface prints.

pub mod config;
pub mod cues;
pub mod error;
pub mod haptics;
pub mod presenter;
pub mod render;
pub mod timeline;
pub mod tree;

pub use config::{CardConfig, HapticsConfig, TimingConfig};
pub use cues::{Cue, CueSheet};
pub use error::{CardError, Result};
pub use haptics::{HapticDevice, Pulse, PulseDriver};
pub use presenter::{CueCursor, LyricPresenter, Pacer, ThreadPacer};
pub use render::{compose_frame, CardFrame};
pub use timeline::{AudioPlayback, FallbackClock, Timeline};
pub use tree::{palette_index, star_color, StarColor, TwinkleCycle, STAR_PALETTE, TREE_LEVELS};
