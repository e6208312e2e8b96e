use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::{CardError, CueSheet, Result, TimingConfig};

/// Cooperative wait seam for the presenter's reveal and polling delays. The
/// session uses [`ThreadPacer`]; tests substitute a recording fake so ticks
/// run instantly.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

/// Pacer backed by real thread sleeps.
#[derive(Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Position of the presentation within the cue table.
///
/// `current_index` is `None` until the first cue starts and only ever moves
/// forward afterwards. `revealed_text` is always a prefix of the text of the
/// cue at `current_index`, growing one character at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueCursor {
    current_index: Option<usize>,
    revealed_text: String,
}

impl CueCursor {
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn revealed_text(&self) -> &str {
        &self.revealed_text
    }

    /// A cue counts as shown once the cursor has reached it: fully for
    /// indices below the cursor, partially at the cursor itself.
    pub fn is_shown(&self, index: usize) -> bool {
        self.current_index.map_or(false, |current| index <= current)
    }
}

/// Drives the cue cursor through the cue table with a typewriter reveal.
///
/// The cursor lives behind a shared handle so the render loop can observe
/// intermediate prefixes while a reveal is still in progress.
pub struct LyricPresenter {
    sheet: CueSheet,
    timing: TimingConfig,
    cursor: Arc<Mutex<CueCursor>>,
}

impl LyricPresenter {
    pub fn new(sheet: CueSheet, timing: TimingConfig) -> Self {
        Self {
            sheet,
            timing,
            cursor: Arc::new(Mutex::new(CueCursor::default())),
        }
    }

    /// Shared view of the cursor for the render loop.
    pub fn cursor_handle(&self) -> Arc<Mutex<CueCursor>> {
        self.cursor.clone()
    }

    /// Copy of the cursor at this instant.
    pub fn snapshot(&self) -> Result<CueCursor> {
        Ok(self.lock_cursor()?.clone())
    }

    /// Delay the driver loop should apply between ticks.
    pub fn poll_period(&self) -> Duration {
        Duration::from_millis(self.timing.poll_period_ms)
    }

    /// One polling tick.
    ///
    /// Captures the elapsed time once and fully reveals every cue whose
    /// timestamp it has reached, in order. Each reveal pauses per character
    /// and publishes the grown prefix through the shared cursor; an empty cue
    /// holds once instead. Advancement is serialized: a reveal must finish
    /// before the next due-cue check, so a cluster of cues due in the same
    /// tick plays out one by one even if the audio is already past them.
    pub fn tick(&mut self, elapsed_millis: u64, pacer: &mut impl Pacer) -> Result<()> {
        loop {
            let next_index = self
                .lock_cursor()?
                .current_index
                .map_or(0, |index| index + 1);

            let cue = match self.sheet.cue(next_index) {
                Some(cue) if cue.timestamp_millis <= elapsed_millis => cue.clone(),
                _ => break,
            };

            {
                let mut cursor = self.lock_cursor()?;
                cursor.current_index = Some(next_index);
                cursor.revealed_text.clear();
            }

            if cue.text.is_empty() {
                pacer.pause(Duration::from_millis(self.timing.empty_line_hold_ms));
                continue;
            }

            for character in cue.text.chars() {
                pacer.pause(Duration::from_millis(self.timing.reveal_delay_ms));
                self.lock_cursor()?.revealed_text.push(character);
            }
        }

        Ok(())
    }

    fn lock_cursor(&self) -> Result<MutexGuard<'_, CueCursor>> {
        self.cursor
            .lock()
            .map_err(|_| CardError::msg("cue cursor has been poisoned"))
    }
}

impl std::fmt::Debug for LyricPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LyricPresenter")
            .field("cues", &self.sheet.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cue;

    /// Records every pause together with the cursor state observed at that
    /// instant, standing in for the render loop watching a live reveal.
    struct RecordingPacer {
        cursor: Arc<Mutex<CueCursor>>,
        pauses: Vec<Duration>,
        observed: Vec<CueCursor>,
    }

    impl RecordingPacer {
        fn watching(presenter: &LyricPresenter) -> Self {
            Self {
                cursor: presenter.cursor_handle(),
                pauses: Vec::new(),
                observed: Vec::new(),
            }
        }
    }

    impl Pacer for RecordingPacer {
        fn pause(&mut self, duration: Duration) {
            self.pauses.push(duration);
            self.observed.push(self.cursor.lock().unwrap().clone());
        }
    }

    fn two_line_presenter() -> LyricPresenter {
        let sheet = CueSheet::from_cues(vec![Cue::new(1_000, "A"), Cue::new(2_000, "BB")]);
        LyricPresenter::new(sheet, TimingConfig::default())
    }

    #[test]
    fn reveals_each_cue_as_its_timestamp_passes() {
        let mut presenter = two_line_presenter();
        let mut pacer = RecordingPacer::watching(&presenter);

        presenter.tick(1_000, &mut pacer).unwrap();
        let cursor = presenter.snapshot().unwrap();
        assert_eq!(cursor.current_index(), Some(0));
        assert_eq!(cursor.revealed_text(), "A");

        presenter.tick(2_000, &mut pacer).unwrap();
        let cursor = presenter.snapshot().unwrap();
        assert_eq!(cursor.current_index(), Some(1));
        assert_eq!(cursor.revealed_text(), "BB");
        assert!(cursor.is_shown(0));
    }

    #[test]
    fn nothing_happens_before_the_first_timestamp() {
        let mut presenter = two_line_presenter();
        let mut pacer = RecordingPacer::watching(&presenter);

        presenter.tick(999, &mut pacer).unwrap();

        let cursor = presenter.snapshot().unwrap();
        assert_eq!(cursor.current_index(), None);
        assert!(pacer.pauses.is_empty());
    }

    #[test]
    fn cursor_never_rewinds() {
        let mut presenter = two_line_presenter();
        let mut pacer = RecordingPacer::watching(&presenter);

        presenter.tick(2_000, &mut pacer).unwrap();
        presenter.tick(0, &mut pacer).unwrap();

        let cursor = presenter.snapshot().unwrap();
        assert_eq!(cursor.current_index(), Some(1));
        assert_eq!(cursor.revealed_text(), "BB");
    }

    #[test]
    fn cues_due_in_one_tick_are_revealed_serially_in_order() {
        let mut presenter = two_line_presenter();
        let mut pacer = RecordingPacer::watching(&presenter);

        presenter.tick(5_000, &mut pacer).unwrap();

        // One character pause for "A", two for "BB".
        assert_eq!(pacer.pauses.len(), 3);
        assert_eq!(pacer.observed[0].current_index(), Some(0));
        assert_eq!(pacer.observed[1].current_index(), Some(1));
        assert_eq!(presenter.snapshot().unwrap().revealed_text(), "BB");
    }

    #[test]
    fn revealed_text_is_always_a_prefix_of_the_current_cue() {
        let sheet = CueSheet::from_cues(vec![Cue::new(0, "silent night")]);
        let mut presenter = LyricPresenter::new(sheet.clone(), TimingConfig::default());
        let mut pacer = RecordingPacer::watching(&presenter);

        presenter.tick(0, &mut pacer).unwrap();

        for cursor in &pacer.observed {
            let index = cursor.current_index().unwrap();
            let text = &sheet.cue(index).unwrap().text;
            assert!(cursor.revealed_text().len() <= text.len());
            assert!(text.starts_with(cursor.revealed_text()));
        }
        assert_eq!(presenter.snapshot().unwrap().revealed_text(), "silent night");
    }

    #[test]
    fn empty_cue_holds_once_then_advances_within_the_same_tick() {
        let sheet = CueSheet::from_cues(vec![Cue::new(100, ""), Cue::new(200, "hi")]);
        let mut presenter = LyricPresenter::new(sheet, TimingConfig::default());
        let mut pacer = RecordingPacer::watching(&presenter);

        presenter.tick(250, &mut pacer).unwrap();

        assert_eq!(pacer.pauses[0], Duration::from_millis(300));
        assert_eq!(pacer.observed[0].revealed_text(), "");
        let cursor = presenter.snapshot().unwrap();
        assert_eq!(cursor.current_index(), Some(1));
        assert_eq!(cursor.revealed_text(), "hi");
    }

    #[test]
    fn idles_once_the_table_is_exhausted() {
        let mut presenter = two_line_presenter();
        let mut pacer = RecordingPacer::watching(&presenter);

        presenter.tick(10_000, &mut pacer).unwrap();
        let pauses_after_finish = pacer.pauses.len();
        presenter.tick(20_000, &mut pacer).unwrap();

        assert_eq!(pacer.pauses.len(), pauses_after_finish);
        assert_eq!(presenter.snapshot().unwrap().current_index(), Some(1));
    }
}
