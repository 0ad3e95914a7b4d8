#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level templates for the EcoSim wetland campaign.
//!
//! A [`LevelDefinition`] is an immutable blueprint: terrain layout, seeded
//! hazards, starting budget, and mission targets. The world instantiates a
//! mutable session from it on every load and reset. Templates are validated
//! on construction, so a definition that exists is always playable.

mod file;

pub use file::{load_campaign, parse_campaign, CampaignFileError};

use thiserror::Error;

use wetland_rescue_core::{
    CellCoord, EntityKind, GridSize, LevelId, MissionTarget, Terrain,
};

/// Terrain and optional occupant preset for one cell of a level template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSeed {
    cell: CellCoord,
    terrain: Terrain,
    occupant: Option<EntityKind>,
}

impl CellSeed {
    /// Creates a new cell seed.
    #[must_use]
    pub const fn new(cell: CellCoord, terrain: Terrain, occupant: Option<EntityKind>) -> Self {
        Self {
            cell,
            terrain,
            occupant,
        }
    }

    /// Coordinate the seed applies to.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Terrain assigned to the cell.
    #[must_use]
    pub const fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Occupant seeded onto the cell, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<EntityKind> {
        self.occupant
    }
}

/// Reasons a level template or campaign fails validation.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The grid has zero rows or zero columns.
    #[error("level grid must have at least one row and one column")]
    EmptyGrid,
    /// The template declares no mission targets.
    #[error("level must declare at least one mission target")]
    NoTargets,
    /// A seed references a coordinate outside the grid.
    #[error("seed at ({row},{column}) lies outside the {rows}x{columns} grid")]
    SeedOutOfBounds {
        /// Row of the offending seed.
        row: u32,
        /// Column of the offending seed.
        column: u32,
        /// Rows in the level grid.
        rows: u32,
        /// Columns in the level grid.
        columns: u32,
    },
    /// Two seeds target the same coordinate.
    #[error("duplicate seed for cell ({row},{column})")]
    DuplicateSeed {
        /// Row of the duplicated coordinate.
        row: u32,
        /// Column of the duplicated coordinate.
        column: u32,
    },
    /// A campaign contains no levels.
    #[error("campaign must contain at least one level")]
    EmptyCampaign,
}

/// Immutable blueprint for one playable level.
#[derive(Clone, Debug)]
pub struct LevelDefinition {
    id: LevelId,
    starting_budget: u32,
    briefing: String,
    targets: Vec<MissionTarget>,
    size: GridSize,
    base_terrain: Terrain,
    seeds: Vec<CellSeed>,
}

impl LevelDefinition {
    /// Creates a validated level template.
    ///
    /// Cells not covered by a seed default to `base_terrain` with no
    /// occupant.
    pub fn new(
        id: LevelId,
        starting_budget: u32,
        briefing: String,
        targets: Vec<MissionTarget>,
        size: GridSize,
        base_terrain: Terrain,
        seeds: Vec<CellSeed>,
    ) -> Result<Self, LevelError> {
        if size.rows() == 0 || size.columns() == 0 {
            return Err(LevelError::EmptyGrid);
        }
        if targets.is_empty() {
            return Err(LevelError::NoTargets);
        }
        for (position, seed) in seeds.iter().enumerate() {
            if !size.contains(seed.cell()) {
                return Err(LevelError::SeedOutOfBounds {
                    row: seed.cell().row(),
                    column: seed.cell().column(),
                    rows: size.rows(),
                    columns: size.columns(),
                });
            }
            if seeds[..position].iter().any(|prior| prior.cell() == seed.cell()) {
                return Err(LevelError::DuplicateSeed {
                    row: seed.cell().row(),
                    column: seed.cell().column(),
                });
            }
        }
        Ok(Self {
            id,
            starting_budget,
            briefing,
            targets,
            size,
            base_terrain,
            seeds,
        })
    }

    /// Identifier of the level.
    #[must_use]
    pub const fn id(&self) -> LevelId {
        self.id
    }

    /// Budget a fresh session starts with.
    #[must_use]
    pub const fn starting_budget(&self) -> u32 {
        self.starting_budget
    }

    /// Mission briefing shown when the level opens.
    #[must_use]
    pub fn briefing(&self) -> &str {
        &self.briefing
    }

    /// Targets that must all be met for the level to complete.
    #[must_use]
    pub fn targets(&self) -> &[MissionTarget] {
        &self.targets
    }

    /// Dimensions of the level grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Terrain assigned to cells no seed covers.
    #[must_use]
    pub const fn base_terrain(&self) -> Terrain {
        self.base_terrain
    }

    /// Per-cell presets applied over the base terrain.
    #[must_use]
    pub fn seeds(&self) -> &[CellSeed] {
        &self.seeds
    }
}

/// Ordered, non-empty collection of level templates forming one run.
#[derive(Clone, Debug)]
pub struct Campaign {
    levels: Vec<LevelDefinition>,
}

impl Campaign {
    /// Creates a campaign from an ordered level list.
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptyCampaign);
        }
        Ok(Self { levels })
    }

    /// The built-in two-level reference campaign.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![first_level(), second_level()])
            .expect("reference campaign is never empty")
    }

    /// All level templates in play order.
    #[must_use]
    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }

    /// Number of levels in the campaign.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Reports whether the campaign holds no levels. Always false for a
    /// constructed campaign.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn seed(row: u32, column: u32, terrain: Terrain) -> CellSeed {
    CellSeed::new(CellCoord::new(row, column), terrain, None)
}

fn seed_with(row: u32, column: u32, terrain: Terrain, occupant: EntityKind) -> CellSeed {
    CellSeed::new(CellCoord::new(row, column), terrain, Some(occupant))
}

fn first_level() -> LevelDefinition {
    use Terrain::{DeepWater, Land, ShallowWater};

    LevelDefinition::new(
        LevelId::new(1),
        400,
        "Clear the polluted shallows and bring the wetland back to life.".to_owned(),
        vec![
            MissionTarget::new(EntityKind::Grass, 2),
            MissionTarget::new(EntityKind::Frog, 1),
        ],
        GridSize::new(4, 4),
        DeepWater,
        vec![
            seed_with(0, 0, DeepWater, EntityKind::Trash),
            seed(0, 1, DeepWater),
            seed(0, 2, ShallowWater),
            seed(0, 3, Land),
            seed_with(1, 0, DeepWater, EntityKind::Trash),
            seed(1, 1, DeepWater),
            seed_with(1, 2, ShallowWater, EntityKind::Bug),
            seed(1, 3, Land),
            seed(2, 0, DeepWater),
            seed_with(2, 1, ShallowWater, EntityKind::Snail),
            seed(2, 2, ShallowWater),
            seed(2, 3, Land),
            seed(3, 0, ShallowWater),
            seed(3, 1, ShallowWater),
            seed(3, 2, Land),
            seed(3, 3, Land),
        ],
    )
    .expect("reference level 1 is valid")
}

fn second_level() -> LevelDefinition {
    use Terrain::{DeepWater, Land, ShallowWater};

    LevelDefinition::new(
        LevelId::new(2),
        600,
        "Build a complete food chain and invite the egret to settle.".to_owned(),
        vec![
            MissionTarget::new(EntityKind::Heron, 1),
            MissionTarget::new(EntityKind::Carp, 2),
        ],
        GridSize::new(4, 4),
        DeepWater,
        vec![
            seed(0, 0, DeepWater),
            seed_with(0, 1, DeepWater, EntityKind::Trash),
            seed(0, 2, DeepWater),
            seed(0, 3, ShallowWater),
            seed(1, 0, DeepWater),
            seed(1, 1, DeepWater),
            seed(1, 2, ShallowWater),
            seed(1, 3, ShallowWater),
            seed_with(2, 0, ShallowWater, EntityKind::Snail),
            seed(2, 1, ShallowWater),
            seed(2, 2, Land),
            seed_with(2, 3, Land, EntityKind::Bug),
            seed(3, 0, Land),
            seed(3, 1, Land),
            seed(3, 2, Land),
            seed(3, 3, Land),
        ],
    )
    .expect("reference level 2 is valid")
}

#[cfg(test)]
mod tests {
    use super::{Campaign, CellSeed, LevelDefinition, LevelError};
    use wetland_rescue_core::{
        CellCoord, EntityKind, GridSize, LevelId, MissionTarget, Terrain,
    };

    fn minimal_level(seeds: Vec<CellSeed>) -> Result<LevelDefinition, LevelError> {
        LevelDefinition::new(
            LevelId::new(9),
            100,
            "test".to_owned(),
            vec![MissionTarget::new(EntityKind::Grass, 1)],
            GridSize::new(2, 2),
            Terrain::DeepWater,
            seeds,
        )
    }

    #[test]
    fn standard_campaign_has_two_valid_levels() {
        let campaign = Campaign::standard();
        assert_eq!(campaign.len(), 2);

        let first = &campaign.levels()[0];
        assert_eq!(first.id(), LevelId::new(1));
        assert_eq!(first.starting_budget(), 400);
        assert_eq!(first.targets().len(), 2);
        assert_eq!(first.size().cell_count(), 16);

        let second = &campaign.levels()[1];
        assert_eq!(second.id(), LevelId::new(2));
        assert_eq!(second.starting_budget(), 600);
    }

    #[test]
    fn standard_campaign_seeds_only_hazards_and_pests() {
        for level in Campaign::standard().levels() {
            for seed in level.seeds() {
                if let Some(occupant) = seed.occupant() {
                    assert!(
                        occupant.is_hazard() || occupant.is_pest(),
                        "level {} seeds a placeable {}",
                        level.id().get(),
                        occupant.label()
                    );
                }
            }
        }
    }

    #[test]
    fn duplicate_seeds_are_rejected() {
        let seeds = vec![
            CellSeed::new(CellCoord::new(0, 0), Terrain::Land, None),
            CellSeed::new(CellCoord::new(0, 0), Terrain::DeepWater, None),
        ];
        assert!(matches!(
            minimal_level(seeds),
            Err(LevelError::DuplicateSeed { row: 0, column: 0 })
        ));
    }

    #[test]
    fn out_of_bounds_seeds_are_rejected() {
        let seeds = vec![CellSeed::new(
            CellCoord::new(5, 5),
            Terrain::Land,
            None,
        )];
        assert!(matches!(
            minimal_level(seeds),
            Err(LevelError::SeedOutOfBounds { row: 5, column: 5, .. })
        ));
    }

    #[test]
    fn empty_targets_are_rejected() {
        let level = LevelDefinition::new(
            LevelId::new(9),
            100,
            "test".to_owned(),
            Vec::new(),
            GridSize::new(2, 2),
            Terrain::DeepWater,
            Vec::new(),
        );
        assert!(matches!(level, Err(LevelError::NoTargets)));
    }

    #[test]
    fn empty_campaigns_are_rejected() {
        assert!(matches!(
            Campaign::new(Vec::new()),
            Err(LevelError::EmptyCampaign)
        ));
    }
}
