use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use holiday_card_core::{AudioPlayback, CardError, Result};
use rodio::{Decoder, OutputStream, Sink};

/// Playback handle over the bundled song, backed by rodio.
///
/// The position is tracked from the instant playback starts; the sink itself
/// does not expose a native position and the drift over one song is well
/// below the presenter's polling period.
pub struct RodioPlayer {
    sink: Sink,
    started_at: Instant,
}

impl RodioPlayer {
    /// Opens the default output, decodes `path` and starts playing it.
    /// Any failure here is the session's single error path: the caller logs
    /// it and falls back to the simulated clock for good.
    pub fn start(path: &Path) -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|error| CardError::msg(format!("failed to open audio output: {error}")))?;

        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file)).map_err(|error| {
            CardError::msg(format!("failed to decode {}: {error}", path.display()))
        })?;

        let sink = Sink::try_new(&handle)
            .map_err(|error| CardError::msg(format!("failed to create audio sink: {error}")))?;
        sink.append(source);
        sink.play();

        // The sink references the stream internally; leaking it keeps the
        // output alive for the whole session without sending the !Send stream
        // across threads. The OS reclaims it at process exit.
        std::mem::forget(stream);

        Ok(Self {
            sink,
            started_at: Instant::now(),
        })
    }
}

impl AudioPlayback for RodioPlayer {
    fn position_millis(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    fn is_playing(&self) -> bool {
        !self.sink.empty() && !self.sink.is_paused()
    }
}
