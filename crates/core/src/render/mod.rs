use crate::tree::{star_color, stars_in_level, TREE_LEVELS};
use crate::{CueCursor, CueSheet};

const ANSI_RESET: &str = "\x1b[0m";
const TRUNK_COLOR: &str = "\x1b[38;5;94m";
const TRUNK_WIDTH: usize = 3;

/// One composed frame of the greeting card: the tree on top, the lyric column
/// underneath. The two regions are produced independently and never overlap;
/// the surface just prints them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFrame {
    pub tree_lines: Vec<String>,
    pub lyric_lines: Vec<String>,
}

impl CardFrame {
    pub fn lines(&self) -> impl Iterator<Item = &String> {
        self.tree_lines.iter().chain(self.lyric_lines.iter())
    }
}

/// Composes the card at one instant of the twinkle cycle and cue cursor.
pub fn compose_frame(
    twinkle_frame: u32,
    sheet: &CueSheet,
    cursor: &CueCursor,
    width: usize,
) -> CardFrame {
    CardFrame {
        tree_lines: render_tree(twinkle_frame, width),
        lyric_lines: render_lyrics(sheet, cursor, width),
    }
}

/// Renders the star rows plus the trunk, centred in `width` columns.
pub fn render_tree(twinkle_frame: u32, width: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(TREE_LEVELS as usize + 1);

    for level in 0..TREE_LEVELS {
        let stars = stars_in_level(level) as usize;
        let visible = stars * 2 - 1;
        let mut row = String::new();
        for position in 0..stars {
            if position > 0 {
                row.push(' ');
            }
            let color = star_color(twinkle_frame, level, position as u32);
            row.push_str(color.ansi_foreground());
            row.push('*');
            row.push_str(ANSI_RESET);
        }
        lines.push(centered(&row, visible, width));
    }

    let trunk = format!("{TRUNK_COLOR}{}{ANSI_RESET}", "█".repeat(TRUNK_WIDTH));
    lines.push(centered(&trunk, TRUNK_WIDTH, width));
    lines
}

/// Renders one line per shown cue: full text below the cursor, the revealed
/// prefix at the cursor, nothing for cues that have not started.
pub fn render_lyrics(sheet: &CueSheet, cursor: &CueCursor, width: usize) -> Vec<String> {
    let Some(current) = cursor.current_index() else {
        return Vec::new();
    };

    sheet
        .iter()
        .enumerate()
        .filter(|(index, _)| cursor.is_shown(*index))
        .map(|(index, cue)| {
            let text = if index == current {
                cursor.revealed_text()
            } else {
                cue.text.as_str()
            };
            centered(text, text.chars().count(), width)
        })
        .collect()
}

fn centered(content: &str, visible_width: usize, total_width: usize) -> String {
    let padding = total_width.saturating_sub(visible_width) / 2;
    format!("{}{content}", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cue, CueSheet, LyricPresenter, Pacer, TimingConfig};
    use std::time::Duration;

    struct InstantPacer;

    impl Pacer for InstantPacer {
        fn pause(&mut self, _duration: Duration) {}
    }

    fn sheet() -> CueSheet {
        CueSheet::from_cues(vec![Cue::new(1_000, "A"), Cue::new(2_000, "BB")])
    }

    #[test]
    fn tree_has_all_star_rows_and_a_trunk() {
        let lines = render_tree(0, 40);
        assert_eq!(lines.len(), TREE_LEVELS as usize + 1);
        assert_eq!(lines[0].matches('*').count(), 1);
        assert_eq!(lines[8].matches('*').count(), 17);
        assert!(lines[9].contains('█'));
    }

    #[test]
    fn lyrics_hidden_before_the_first_cue() {
        let cursor = CueCursor::default();
        assert!(render_lyrics(&sheet(), &cursor, 40).is_empty());
    }

    #[test]
    fn shown_lines_render_full_text_and_the_current_prefix() {
        let sheet = sheet();
        let mut presenter = LyricPresenter::new(sheet.clone(), TimingConfig::default());
        presenter.tick(2_000, &mut InstantPacer).unwrap();
        let cursor = presenter.snapshot().unwrap();

        let lines = render_lyrics(&sheet, &cursor, 10);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].trim_start().starts_with('A'));
        assert_eq!(lines[1].trim_start(), "BB");
    }

    #[test]
    fn frame_regions_are_disjoint() {
        let cursor = CueCursor::default();
        let frame = compose_frame(50, &sheet(), &cursor, 40);
        assert_eq!(frame.tree_lines.len(), TREE_LEVELS as usize + 1);
        assert!(frame.lyric_lines.is_empty());
        assert_eq!(frame.lines().count(), frame.tree_lines.len());
    }
}
