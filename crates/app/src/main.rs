mod playback;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use holiday_card_core::{
    compose_frame, CardConfig, CardError, CueSheet, HapticDevice, LyricPresenter, Pacer, Pulse,
    PulseDriver, ThreadPacer, Timeline, TwinkleCycle,
};
use tracing_subscriber::EnvFilter;

fn main() -> holiday_card_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            audio,
            duration,
            haptics,
            width,
        } => run_card(audio, duration, haptics, width),
        Commands::Lyrics { input } => run_lyrics(input.as_deref()),
    }
}

fn run_card(
    audio: Option<PathBuf>,
    duration_secs: Option<u64>,
    haptics: bool,
    width: usize,
) -> holiday_card_core::Result<()> {
    let config = CardConfig::default();
    let sheet = CueSheet::last_christmas();

    // A failure to start audio is permanent for the session: the fallback
    // clock takes over and is never revisited.
    let timeline = match audio.as_deref().map(playback::RodioPlayer::start) {
        Some(Ok(player)) => {
            tracing::info!(path = ?audio, "audio playback started");
            Arc::new(Timeline::with_audio(Box::new(player)))
        }
        Some(Err(error)) => {
            tracing::warn!(%error, "audio unavailable, falling back to simulated clock");
            Arc::new(Timeline::without_audio())
        }
        None => {
            tracing::info!("no audio file given, using simulated clock");
            Arc::new(Timeline::without_audio())
        }
    };

    if !timeline.has_audio() {
        let timeline = timeline.clone();
        let step = config.timing.fallback_step_ms;
        thread::spawn(move || loop {
            thread::sleep(Duration::from_millis(step));
            timeline.fallback().advance(step);
        });
    }

    let mut presenter = LyricPresenter::new(sheet.clone(), config.timing.clone());
    let cursor = presenter.cursor_handle();
    {
        let timeline = timeline.clone();
        thread::spawn(move || {
            let mut pacer = ThreadPacer;
            loop {
                if let Err(error) = presenter.tick(timeline.elapsed_millis(), &mut pacer) {
                    tracing::error!(%error, "lyric presenter stopped");
                    break;
                }
                pacer.pause(presenter.poll_period());
            }
        });
    }

    let device: Option<Box<dyn HapticDevice>> =
        haptics.then(|| Box::new(TracingHaptics) as Box<dyn HapticDevice>);
    let mut driver = PulseDriver::new(device, config.haptics.clone());
    {
        let timeline = timeline.clone();
        thread::spawn(move || loop {
            driver.tick(timeline.elapsed_millis(), timeline.is_active());
            thread::sleep(Duration::from_millis(driver.pulse_period_ms()));
        });
    }

    render_loop(&sheet, &cursor, &config, duration_secs, width)
}

fn render_loop(
    sheet: &CueSheet,
    cursor: &std::sync::Mutex<holiday_card_core::CueCursor>,
    config: &CardConfig,
    duration_secs: Option<u64>,
    width: usize,
) -> holiday_card_core::Result<()> {
    let twinkle = TwinkleCycle::new(config.timing.twinkle_period_ms);
    let session_start = Instant::now();
    let deadline = duration_secs.map(|secs| session_start + Duration::from_secs(secs));

    let mut stdout = std::io::stdout();
    loop {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return Ok(());
            }
        }

        let frame = twinkle.frame_at(session_start.elapsed().as_millis() as u64);
        let snapshot = cursor
            .lock()
            .map_err(|_| CardError::msg("cue cursor has been poisoned"))?
            .clone();
        let card = compose_frame(frame, sheet, &snapshot, width);

        let mut output = String::from("\x1b[2J\x1b[H");
        for line in card.lines() {
            output.push_str(line);
            output.push('\n');
        }
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;

        thread::sleep(Duration::from_millis(50));
    }
}

fn run_lyrics(input: Option<&Path>) -> holiday_card_core::Result<()> {
    let sheet = match input {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let sheet = CueSheet::from_json_str(&json)?;
            tracing::info!(path = %path.display(), cues = sheet.len(), "loaded cue sheet");
            sheet
        }
        None => CueSheet::last_christmas(),
    };

    println!("{}", sheet.to_json_string()?);
    Ok(())
}

/// Haptic device for desktops without a vibrator: each pulse becomes a
/// tracing event so the window behaviour stays observable.
struct TracingHaptics;

impl HapticDevice for TracingHaptics {
    fn pulse(&mut self, pulse: Pulse) {
        tracing::debug!(duration_millis = pulse.duration_millis, "haptic pulse");
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Animated holiday greeting card", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the animated greeting in the terminal.
    Play {
        /// Audio file driving the lyric timing. Omitted or unplayable files
        /// fall back to a simulated clock.
        #[arg(short, long)]
        audio: Option<PathBuf>,
        /// Stop after this many seconds instead of running indefinitely.
        #[arg(short, long)]
        duration: Option<u64>,
        /// Log a tracing event for every haptic pulse.
        #[arg(long)]
        haptics: bool,
        /// Width of the rendered card in columns.
        #[arg(long, default_value_t = 60)]
        width: usize,
    },
    /// Print a cue sheet as JSON: the builtin song, or a validated custom sheet.
    Lyrics {
        /// Custom cue sheet to load, validate and re-emit.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}
