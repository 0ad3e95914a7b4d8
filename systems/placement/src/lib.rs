#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement rule engine for the EcoSim wetland.
//!
//! Placement constraints live in a declarative table: one [`PlacementRule`]
//! record per placeable kind, resolved through the total [`Ruleset`] lookup.
//! The validation algorithm itself never branches on specific kinds, so new
//! kinds extend the table without touching it.

use wetland_rescue_core::{
    CellCoord, EntityKind, GridView, NeighborCategory, PlaceableKind, PlacementRejection, Terrain,
};

const DEEP_WATER_ONLY: &[Terrain] = &[Terrain::DeepWater];
const OPEN_WATER: &[Terrain] = &[Terrain::DeepWater, Terrain::ShallowWater];
const WATERSIDE: &[Terrain] = &[Terrain::Land, Terrain::ShallowWater];
const SHORE_ONLY: &[Terrain] = &[Terrain::Land];

/// Adjacency prerequisite demanding a minimum count of matching neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdjacencyRequirement {
    category: NeighborCategory,
    minimum: u32,
}

impl AdjacencyRequirement {
    /// Creates a new adjacency requirement.
    #[must_use]
    pub const fn new(category: NeighborCategory, minimum: u32) -> Self {
        Self { category, minimum }
    }

    /// Neighbor category the requirement counts.
    #[must_use]
    pub const fn category(&self) -> NeighborCategory {
        self.category
    }

    /// Minimum matching neighbor count the rule demands.
    #[must_use]
    pub const fn minimum(&self) -> u32 {
        self.minimum
    }
}

/// Declarative placement constraints for one placeable kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementRule {
    allowed_terrain: &'static [Terrain],
    requires: Option<AdjacencyRequirement>,
}

impl PlacementRule {
    /// Creates a rule from an allowed terrain set and an optional adjacency
    /// requirement. The terrain set must not be empty.
    #[must_use]
    pub const fn new(
        allowed_terrain: &'static [Terrain],
        requires: Option<AdjacencyRequirement>,
    ) -> Self {
        Self {
            allowed_terrain,
            requires,
        }
    }

    /// Terrain the kind may be placed on.
    #[must_use]
    pub const fn allowed_terrain(&self) -> &'static [Terrain] {
        self.allowed_terrain
    }

    /// Adjacency prerequisite, if the kind has one.
    #[must_use]
    pub const fn requires(&self) -> Option<AdjacencyRequirement> {
        self.requires
    }

    fn permits_terrain(&self, terrain: Terrain) -> bool {
        self.allowed_terrain.iter().any(|allowed| *allowed == terrain)
    }
}

/// Constraint record for a single placeable kind.
///
/// Serves as the one place where the wetland's ecology is configured; the
/// validation algorithm consumes the records generically.
const fn standard_rule(kind: PlaceableKind) -> PlacementRule {
    match kind {
        PlaceableKind::Grass => PlacementRule::new(DEEP_WATER_ONLY, None),
        PlaceableKind::Lotus => PlacementRule::new(
            OPEN_WATER,
            Some(AdjacencyRequirement::new(
                NeighborCategory::Kind(EntityKind::Grass),
                1,
            )),
        ),
        PlaceableKind::Carp => PlacementRule::new(
            DEEP_WATER_ONLY,
            Some(AdjacencyRequirement::new(NeighborCategory::Plant, 1)),
        ),
        PlaceableKind::Frog => PlacementRule::new(WATERSIDE, None),
        PlaceableKind::Heron => PlacementRule::new(
            WATERSIDE,
            Some(AdjacencyRequirement::new(NeighborCategory::Fish, 1)),
        ),
        PlaceableKind::Stork => PlacementRule::new(
            SHORE_ONLY,
            Some(AdjacencyRequirement::new(NeighborCategory::Fish, 2)),
        ),
    }
}

/// Static table mapping every placeable kind to its placement rule.
///
/// The table is total over [`PlaceableKind`]: an unknown tool cannot reach
/// the engine, and a missing entry cannot exist.
#[derive(Clone, Copy, Debug)]
pub struct Ruleset {
    rules: [PlacementRule; PlaceableKind::ALL.len()],
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::standard()
    }
}

impl Ruleset {
    /// The standard wetland ruleset.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            rules: PlaceableKind::ALL.map(standard_rule),
        }
    }

    /// Retrieves the rule governing the provided kind.
    #[must_use]
    pub fn rule(&self, kind: PlaceableKind) -> &PlacementRule {
        &self.rules[kind as usize]
    }

    /// Validates a placement attempt against the rule table.
    ///
    /// Pure predicate: the verdict depends only on the grid contents and the
    /// static table. Affordability is deliberately out of scope here; the
    /// session checks funds only after structural validation passes, so a
    /// structurally invalid placement is always reported first.
    pub fn evaluate(
        &self,
        kind: PlaceableKind,
        cell: CellCoord,
        grid: &GridView<'_>,
    ) -> Result<(), PlacementRejection> {
        let Some(terrain) = grid.terrain(cell) else {
            return Err(PlacementRejection::OutOfBounds);
        };

        let rule = self.rule(kind);
        if !rule.permits_terrain(terrain) {
            return Err(PlacementRejection::TerrainUnsuitable);
        }

        if let Some(occupant) = grid.occupant(cell) {
            let devoured = kind == PlaceableKind::Frog && occupant.is_pest();
            if !devoured {
                return Err(match occupant {
                    EntityKind::Snail => PlacementRejection::OccupiedByInvasive,
                    EntityKind::Bug => PlacementRejection::PestInterference,
                    _ => PlacementRejection::Occupied,
                });
            }
        }

        if let Some(requirement) = rule.requires() {
            let matching = grid
                .neighbors(cell)
                .filter(|neighbor| {
                    grid.occupant(*neighbor)
                        .is_some_and(|occupant| requirement.category().matches(occupant))
                })
                .count();
            let matching = u32::try_from(matching).unwrap_or(u32::MAX);
            if matching < requirement.minimum() {
                return Err(PlacementRejection::MissingNeighbor {
                    category: requirement.category(),
                    required: requirement.minimum(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Ruleset;
    use wetland_rescue_core::PlaceableKind;

    #[test]
    fn every_placeable_kind_has_a_rule_with_terrain() {
        let ruleset = Ruleset::standard();
        for kind in PlaceableKind::ALL {
            assert!(
                !ruleset.rule(kind).allowed_terrain().is_empty(),
                "{} has an empty terrain set",
                kind.label()
            );
        }
    }

    #[test]
    fn producers_without_prerequisites_have_no_requirement() {
        let ruleset = Ruleset::standard();
        assert!(ruleset.rule(PlaceableKind::Grass).requires().is_none());
        assert!(ruleset.rule(PlaceableKind::Frog).requires().is_none());
        assert!(ruleset.rule(PlaceableKind::Stork).requires().is_some());
    }
}
