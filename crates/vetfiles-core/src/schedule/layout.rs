//! Pixel geometry for the day/week time grid.
//!
//! One hour row is 96 px tall; an appointment block maps linearly from
//! wall-clock time into that space. Overlapping appointments are not
//! resolved, they stack.

use chrono::{NaiveTime, Timelike};

/// Height of one hour row in the time grid.
pub const HOUR_ROW_PX: f64 = 96.0;

/// Vertical inset subtracted from every block.
pub const BLOCK_INSET_PX: f64 = 8.0;

/// Placement of one appointment block inside a day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGeometry {
    /// Offset from the top of the grid, px
    pub top: f64,
    /// Block height, px
    pub height: f64,
}

/// Vertical offset of a block starting at the given wall-clock time.
pub fn block_top_px(start: NaiveTime) -> f64 {
    start.hour() as f64 * HOUR_ROW_PX + start.minute() as f64 * HOUR_ROW_PX / 60.0
}

/// Height of a block lasting the given number of minutes.
pub fn block_height_px(duration_minutes: i64) -> f64 {
    duration_minutes as f64 * HOUR_ROW_PX / 60.0 - BLOCK_INSET_PX
}

/// Full placement for one appointment.
pub fn block_geometry(start: NaiveTime, duration_minutes: i64) -> BlockGeometry {
    BlockGeometry {
        top: block_top_px(start),
        height: block_height_px(duration_minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_reference_block() {
        // 09:30 for 39 minutes
        let geometry = block_geometry(time(9, 30), 39);
        assert_eq!(geometry.top, 912.0);
        assert!((geometry.height - 54.4).abs() < 1e-9);
    }

    #[test]
    fn test_midnight_block_starts_at_zero() {
        assert_eq!(block_top_px(time(0, 0)), 0.0);
    }

    #[test]
    fn test_on_the_hour_is_row_aligned() {
        assert_eq!(block_top_px(time(11, 0)), 11.0 * HOUR_ROW_PX);
    }

    #[test]
    fn test_height_is_linear_in_duration() {
        assert_eq!(block_height_px(60), HOUR_ROW_PX - BLOCK_INSET_PX);
        assert_eq!(block_height_px(120), 2.0 * HOUR_ROW_PX - BLOCK_INSET_PX);
    }

    #[test]
    fn test_last_visible_minute() {
        // 23:59 sits just under the 24-hour boundary
        let top = block_top_px(time(23, 59));
        assert!(top < 24.0 * HOUR_ROW_PX);
        assert!(top > 23.0 * HOUR_ROW_PX);
    }
}
