use serde::{Deserialize, Serialize};

/// Number of star rows in the tree.
pub const TREE_LEVELS: u32 = 9;

/// Colours a star can twinkle through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl StarColor {
    /// ANSI foreground escape for terminal surfaces.
    pub fn ansi_foreground(self) -> &'static str {
        match self {
            StarColor::Red => "\x1b[31m",
            StarColor::Green => "\x1b[32m",
            StarColor::Yellow => "\x1b[33m",
            StarColor::Blue => "\x1b[34m",
            StarColor::Magenta => "\x1b[35m",
            StarColor::Cyan => "\x1b[36m",
            StarColor::White => "\x1b[37m",
        }
    }
}

pub const STAR_PALETTE: [StarColor; 7] = [
    StarColor::Red,
    StarColor::Green,
    StarColor::Yellow,
    StarColor::Blue,
    StarColor::Magenta,
    StarColor::Cyan,
    StarColor::White,
];

/// Stars on a given row, widening towards the base.
pub fn stars_in_level(level: u32) -> u32 {
    level * 2 + 1
}

/// Positional hash selecting a palette slot for one star. Pure: the same
/// `(frame, level, position)` always lands on the same colour.
pub fn palette_index(frame: u32, level: u32, position: u32) -> usize {
    ((frame + level * 7 + position * 11) % STAR_PALETTE.len() as u32) as usize
}

pub fn star_color(frame: u32, level: u32, position: u32) -> StarColor {
    STAR_PALETTE[palette_index(frame, level, position)]
}

/// Repeating 0→100 linear cycle driving the twinkle. Restarts each period;
/// nothing persists across cycles.
#[derive(Debug, Clone, Copy)]
pub struct TwinkleCycle {
    period_millis: u64,
}

impl TwinkleCycle {
    pub fn new(period_millis: u64) -> Self {
        Self {
            period_millis: period_millis.max(1),
        }
    }

    /// Cycle value at an instant, in `0..=100`.
    pub fn frame_at(&self, elapsed_millis: u64) -> u32 {
        ((elapsed_millis % self.period_millis) * 100 / self.period_millis) as u32
    }
}

impl Default for TwinkleCycle {
    fn default() -> Self {
        Self::new(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_index_is_pure_and_in_bounds() {
        for frame in [0, 37, 99, 100] {
            for level in 0..TREE_LEVELS {
                for position in 0..stars_in_level(level) {
                    let index = palette_index(frame, level, position);
                    assert!(index < STAR_PALETTE.len());
                    assert_eq!(index, palette_index(frame, level, position));
                }
            }
        }
    }

    #[test]
    fn rows_widen_by_two_stars_per_level() {
        assert_eq!(stars_in_level(0), 1);
        assert_eq!(stars_in_level(4), 9);
        assert_eq!(stars_in_level(TREE_LEVELS - 1), 17);
    }

    #[test]
    fn twinkle_cycle_restarts_each_period() {
        let cycle = TwinkleCycle::new(500);
        assert_eq!(cycle.frame_at(0), 0);
        assert_eq!(cycle.frame_at(250), 50);
        assert_eq!(cycle.frame_at(499), 99);
        assert_eq!(cycle.frame_at(500), 0);
        assert!(cycle.frame_at(123_456) <= 100);
    }
}
