// Completion statistics over a saved progress document.

use serde::Serialize;

use crate::models::roadmap::{RoadmapProgressData, RoadmapStep};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressStats {
    pub total: usize,
    pub completed: usize,
    pub percentage: u32,
}

/// Counts checkable items across the roadmap and how many are checked.
/// Every `true` entry in the check map counts, whether or not its id still
/// points at an item in the roadmap.
pub fn calculate_progress(data: &RoadmapProgressData) -> ProgressStats {
    let total: usize = data.roadmap.iter().map(RoadmapStep::checkable_items).sum();
    let completed = data
        .checked_items
        .values()
        .filter(|&&checked| checked)
        .count();
    let percentage = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    ProgressStats {
        total,
        completed,
        percentage,
    }
}
