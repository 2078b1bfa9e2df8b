//! Pointer steering
//!
//! A click (or touch) doesn't name a direction. It names a point, and the
//! snake should head towards it. The offset from the head is split into its
//! horizontal and vertical parts; each part that points somewhere becomes a
//! candidate, the larger one first. The engine then takes the first
//! candidate that isn't a reversal.

use crate::game::{Cell, Direction};

/// Ranked directions from `head` towards `target`, at most one per axis
pub fn rank_directions(head: Cell, target: Cell) -> Vec<Direction> {
    let dcol = target.col - head.col;
    let drow = target.row - head.row;

    let horizontal = if dcol > 0 {
        Direction::Right
    } else {
        Direction::Left
    };
    let vertical = if drow > 0 {
        Direction::Down
    } else {
        Direction::Up
    };

    let mut weighted: Vec<(u32, Direction)> = [
        (dcol.unsigned_abs(), horizontal),
        (drow.unsigned_abs(), vertical),
    ]
    .into_iter()
    .filter(|(weight, _)| *weight > 0)
    .collect();

    // Stable sort keeps horizontal first on ties
    weighted.sort_by(|a, b| b.0.cmp(&a.0));
    weighted.into_iter().map(|(_, direction)| direction).collect()
}
