//! Position-to-points scoring table.
//!
//! Every race awards points by finishing position from one fixed table,
//! shared by group races and bracket matches.

/// Points awarded for finishing positions 1 through 12.
const POINTS_TABLE: [u32; 12] = [15, 12, 10, 8, 7, 6, 5, 4, 3, 2, 1, 0];

/// Points awarded for a finishing position.
///
/// Positions outside 1..=12 score zero; the function is total and never
/// fails.
pub fn get_points(position: u32) -> u32 {
    match position {
        1..=12 => POINTS_TABLE[(position - 1) as usize],
        _ => 0,
    }
}
