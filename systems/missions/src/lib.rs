#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure mission evaluation over wetland grid snapshots.

use wetland_rescue_core::{GridView, MissionProgress, MissionTarget, TargetProgress};

/// Evaluates every mission target against the provided grid.
///
/// Completion is the conjunction of all targets, but every target is counted
/// even when an earlier one already fails, so the shell can display
/// current/required pairs regardless of the overall verdict. Pure and
/// idempotent: the same grid always yields the same progress.
#[must_use]
pub fn evaluate(grid: &GridView<'_>, targets: &[MissionTarget]) -> MissionProgress {
    let entries = targets
        .iter()
        .map(|target| TargetProgress {
            kind: target.kind(),
            required: target.required(),
            current: grid.population(target.kind()),
        })
        .collect();
    MissionProgress::new(entries)
}
