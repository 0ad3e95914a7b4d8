//! Dense cell storage for the live session grid.

use wetland_rescue_core::{CellCoord, EntityKind, GridSize, GridView, Terrain};
use wetland_rescue_levels::LevelDefinition;

/// Authoritative terrain and occupancy storage for one level session.
///
/// Terrain is written once at instantiation and never mutated afterwards;
/// only occupants change in response to accepted actions.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    size: GridSize,
    terrain: Vec<Terrain>,
    occupants: Vec<Option<EntityKind>>,
}

impl Grid {
    /// Instantiates the grid described by a level template.
    ///
    /// Cells the template does not seed receive the base terrain and no
    /// occupant. Template validation guarantees every seed is in bounds.
    pub(crate) fn from_level(level: &LevelDefinition) -> Self {
        let size = level.size();
        let mut terrain = vec![level.base_terrain(); size.cell_count()];
        let mut occupants = vec![None; size.cell_count()];
        for seed in level.seeds() {
            if let Some(index) = size.index_of(seed.cell()) {
                terrain[index] = seed.terrain();
                occupants[index] = seed.occupant();
            }
        }
        Self {
            size,
            terrain,
            occupants,
        }
    }

    /// Dimensions of the grid.
    pub(crate) const fn size(&self) -> GridSize {
        self.size
    }

    /// Occupant of the provided cell, if any.
    pub(crate) fn occupant(&self, cell: CellCoord) -> Option<EntityKind> {
        self.size
            .index_of(cell)
            .and_then(|index| self.occupants.get(index).copied().flatten())
    }

    /// Writes the occupant of an in-bounds cell; out-of-bounds writes are
    /// rejected upstream and ignored here.
    pub(crate) fn set_occupant(&mut self, cell: CellCoord, occupant: Option<EntityKind>) {
        if let Some(index) = self.size.index_of(cell) {
            self.occupants[index] = occupant;
        }
    }

    /// Captures a read-only view usable by pure systems.
    pub(crate) fn view(&self) -> GridView<'_> {
        GridView::new(&self.terrain, &self.occupants, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use wetland_rescue_core::{
        CellCoord, EntityKind, GridSize, LevelId, MissionTarget, Terrain,
    };
    use wetland_rescue_levels::{CellSeed, LevelDefinition};

    fn template() -> LevelDefinition {
        LevelDefinition::new(
            LevelId::new(1),
            100,
            "test".to_owned(),
            vec![MissionTarget::new(EntityKind::Grass, 1)],
            GridSize::new(2, 3),
            Terrain::DeepWater,
            vec![CellSeed::new(
                CellCoord::new(1, 2),
                Terrain::Land,
                Some(EntityKind::Trash),
            )],
        )
        .expect("template is valid")
    }

    #[test]
    fn unseeded_cells_default_to_base_terrain_and_empty() {
        let grid = Grid::from_level(&template());
        let view = grid.view();

        assert_eq!(view.terrain(CellCoord::new(0, 0)), Some(Terrain::DeepWater));
        assert!(view.is_empty(CellCoord::new(0, 0)));
        assert_eq!(view.terrain(CellCoord::new(1, 2)), Some(Terrain::Land));
        assert_eq!(view.occupant(CellCoord::new(1, 2)), Some(EntityKind::Trash));
    }

    #[test]
    fn occupants_can_be_written_and_cleared() {
        let mut grid = Grid::from_level(&template());
        grid.set_occupant(CellCoord::new(0, 1), Some(EntityKind::Grass));
        assert_eq!(grid.occupant(CellCoord::new(0, 1)), Some(EntityKind::Grass));

        grid.set_occupant(CellCoord::new(0, 1), None);
        assert!(grid.occupant(CellCoord::new(0, 1)).is_none());
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut grid = Grid::from_level(&template());
        grid.set_occupant(CellCoord::new(9, 9), Some(EntityKind::Stork));
        assert!(grid.occupant(CellCoord::new(9, 9)).is_none());
    }
}
