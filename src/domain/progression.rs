//! Progression rules: the xp-to-level threshold table.
//!
//! Levels are a pure function of accumulated xp. The reward engine
//! recomputes the level on every mutation instead of trusting the stored
//! value, so `level == level_for_xp(xp)` holds after any write.

/// Maximum reachable level. Xp keeps accumulating past it.
pub const MAX_LEVEL: u8 = 5;

/// Xp thresholds for levels 2..=5, lowest first.
const THRESHOLDS: [i64; 4] = [100, 300, 600, 1000];

/// Nominal width of the terminal level-5 window, used only for progress
/// display.
const PLATEAU_WINDOW: i64 = 1000;

/// Returns the level for the given xp total.
///
/// Table-driven: xp ≥ 1000 → 5, ≥ 600 → 4, ≥ 300 → 3, ≥ 100 → 2, else 1.
/// Monotonic and total over all xp values.
#[must_use]
pub fn level_for_xp(xp: i64) -> u8 {
    let mut level = 1u8;
    for threshold in THRESHOLDS {
        if xp >= threshold {
            level += 1;
        }
    }
    level
}

/// Returns the `(floor, ceiling)` xp window for a level, used by the
/// presentation layer to compute progress-bar percentages.
///
/// Level 5 is a terminal plateau and reports a fixed nominal window of
/// [`PLATEAU_WINDOW`] above its floor.
#[must_use]
pub fn xp_window(level: u8) -> (i64, i64) {
    match level {
        0 | 1 => (0, 100),
        2 => (100, 300),
        3 => (300, 600),
        4 => (600, 1000),
        _ => (1000, 1000 + PLATEAU_WINDOW),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundaries() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(299), 2);
        assert_eq!(level_for_xp(300), 3);
        assert_eq!(level_for_xp(599), 3);
        assert_eq!(level_for_xp(600), 4);
        assert_eq!(level_for_xp(999), 4);
        assert_eq!(level_for_xp(1000), 5);
        assert_eq!(level_for_xp(50_000), 5);
    }

    #[test]
    fn monotonic_and_bounded() {
        let mut prev = 0u8;
        for xp in 0..2000 {
            let level = level_for_xp(xp);
            assert!((1..=MAX_LEVEL).contains(&level));
            assert!(level >= prev);
            prev = level;
        }
    }

    #[test]
    fn windows_tile_the_xp_axis() {
        for level in 1..MAX_LEVEL {
            let (_, ceiling) = xp_window(level);
            let (next_floor, _) = xp_window(level + 1);
            assert_eq!(ceiling, next_floor);
        }
    }

    #[test]
    fn window_contains_its_level() {
        for xp in [0, 50, 100, 250, 300, 599, 600, 999] {
            let level = level_for_xp(xp);
            let (floor, ceiling) = xp_window(level);
            assert!(xp >= floor && xp < ceiling);
        }
    }

    #[test]
    fn plateau_window_is_nominal() {
        assert_eq!(xp_window(5), (1000, 2000));
    }
}
