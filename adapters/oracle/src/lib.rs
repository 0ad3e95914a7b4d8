#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! External narrator contract consumed by the EcoSim shell.
//!
//! The narrator is an advisory text oracle: hints, flavor dialogue, and the
//! level-completion newspaper. It never affects validity or the economy, and
//! every call may fail; callers substitute the static fallbacks below so
//! gameplay never blocks on it.

use wetland_rescue_core::{EntityKind, GridView, LevelId, LevelSummary};

/// Generic encouragement used when no hint can be generated.
pub const FALLBACK_HINT: &str = "Keep going! Maybe start by tidying up the trash.";

/// Flavor line used when an inspected entity has nothing to say.
pub const FALLBACK_FLAVOR: &str = "Hello there!";

/// Flavor line for inspecting an empty cell.
pub const EMPTY_CELL_FLAVOR: &str = "It is quiet and empty here...";

/// Context handed to the narrator for a placement hint.
#[derive(Clone, Debug)]
pub struct HintContext {
    /// Formatted grid description, one entry per cell.
    pub grid: String,
    /// Mission briefing of the level in play.
    pub briefing: String,
    /// Remaining budget balance.
    pub budget: u32,
}

/// Context handed to the narrator for a level summary.
#[derive(Clone, Debug)]
pub struct SummaryContext {
    /// Identifier of the completed level.
    pub level: LevelId,
    /// Final score of the completed session.
    pub score: u32,
    /// Kinds present on the grid at completion time.
    pub inhabitants: Vec<EntityKind>,
}

/// External text-generation oracle.
///
/// Every accessor returns `None` when the oracle is unavailable or fails;
/// results are advisory and late responses are discarded by token, so
/// implementations need no retry or ordering guarantees.
pub trait Narrator {
    /// Advisory placement hint for the current grid, mission, and budget.
    fn placement_hint(&self, context: &HintContext) -> Option<String>;

    /// First-person flavor line for an inspected entity.
    fn entity_flavor(&self, label: &str) -> Option<String>;

    /// Level-completion newspaper content.
    fn level_summary(&self, context: &SummaryContext) -> Option<LevelSummary>;
}

/// Offline narrator with canned responses.
///
/// Stands in for the generative service in tests, scripted runs, and
/// whenever the shell has no service configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticNarrator;

impl Narrator for StaticNarrator {
    fn placement_hint(&self, context: &HintContext) -> Option<String> {
        if context.budget < 50 {
            return Some("Funds are running low. Clearing hazards is cheap and earns points.".to_owned());
        }
        Some(FALLBACK_HINT.to_owned())
    }

    fn entity_flavor(&self, label: &str) -> Option<String> {
        Some(format!("The {label} seems glad you stopped by."))
    }

    fn level_summary(&self, _context: &SummaryContext) -> Option<LevelSummary> {
        Some(LevelSummary::fallback())
    }
}

/// Formats a grid description for narrator prompts.
///
/// One entry per cell in row-major order, e.g.
/// `R0C0[deep-water]: trash, R0C1[deep-water]: empty, ...`.
#[must_use]
pub fn describe_grid(view: &GridView<'_>) -> String {
    let mut description = String::new();
    for (cell, terrain, occupant) in view.cells() {
        if !description.is_empty() {
            description.push_str(", ");
        }
        let occupant_label = occupant.map_or("empty", EntityKind::label);
        description.push_str(&format!(
            "R{}C{}[{}]: {}",
            cell.row(),
            cell.column(),
            terrain.label(),
            occupant_label
        ));
    }
    description
}

#[cfg(test)]
mod tests {
    use super::{describe_grid, HintContext, Narrator, StaticNarrator, SummaryContext};
    use wetland_rescue_core::{
        EntityKind, GridSize, GridView, LevelId, LevelSummary, Terrain,
    };

    #[test]
    fn grid_description_lists_cells_in_row_major_order() {
        let size = GridSize::new(1, 2);
        let terrain = vec![Terrain::DeepWater, Terrain::Land];
        let occupants = vec![Some(EntityKind::Trash), None];
        let view = GridView::new(&terrain, &occupants, size);

        assert_eq!(
            describe_grid(&view),
            "R0C0[deep-water]: trash, R0C1[land]: empty"
        );
    }

    #[test]
    fn static_narrator_always_answers() {
        let narrator = StaticNarrator;
        let hint = narrator.placement_hint(&HintContext {
            grid: String::new(),
            briefing: "test".to_owned(),
            budget: 400,
        });
        assert!(hint.is_some());

        assert!(narrator.entity_flavor("marsh frog").is_some());

        let summary = narrator.level_summary(&SummaryContext {
            level: LevelId::new(1),
            score: 150,
            inhabitants: vec![EntityKind::Grass],
        });
        assert_eq!(summary, Some(LevelSummary::fallback()));
    }

    #[test]
    fn static_narrator_warns_when_funds_run_low() {
        let narrator = StaticNarrator;
        let hint = narrator
            .placement_hint(&HintContext {
                grid: String::new(),
                briefing: "test".to_owned(),
                budget: 10,
            })
            .expect("hint present");
        assert!(hint.contains("low"));
    }
}
