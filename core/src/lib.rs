#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the EcoSim engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session world, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for
//! presentation layers and systems to react to deterministically. Systems
//! consume read-only [`GridView`] snapshots and never mutate state themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the wetland, little warden.";

/// Score awarded for an ordinary successful placement.
pub const PLACEMENT_POINTS: u32 = 50;

/// Score awarded when the predator devours a pest on placement.
pub const PREDATION_POINTS: u32 = 150;

/// Budget refund granted for the predation special case.
///
/// Strictly exceeds the predator's acquisition cost, so predation is always
/// a net budget gain.
pub const PREDATION_BOUNTY: u32 = 100;

/// Ground/water classification of a grid cell.
///
/// Terrain is fixed per cell for the lifetime of a level and never mutated
/// after level load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Terrain {
    /// Open water deep enough for submerged plants and fish.
    DeepWater,
    /// Marshy shallows along the waterline.
    ShallowWater,
    /// Dry shore and meadow.
    Land,
}

impl Terrain {
    /// Human-readable label used in prompts and shell output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DeepWater => "deep-water",
            Self::ShallowWater => "shallow-water",
            Self::Land => "land",
        }
    }
}

/// Ecological element occupying a grid cell.
///
/// Hazards (trash, the invasive snail) and the pest (midge) are seeded by
/// level templates and removed by the player; the remaining kinds are bought
/// and placed via [`PlaceableKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// Floating garbage polluting the water.
    Trash,
    /// Invasive apple snail squatting on a cell.
    Snail,
    /// Midge pest that the marsh frog preys on.
    Bug,
    /// Eelgrass, the submerged producer.
    Grass,
    /// Lotus, the flowering producer.
    Lotus,
    /// Red carp, the fish consumer.
    Carp,
    /// Marsh frog, the beneficial predator.
    Frog,
    /// Little egret, the wading bird consumer.
    Heron,
    /// Oriental stork, the apex bird consumer.
    Stork,
}

impl EntityKind {
    /// Every entity kind, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Trash,
        Self::Snail,
        Self::Bug,
        Self::Grass,
        Self::Lotus,
        Self::Carp,
        Self::Frog,
        Self::Heron,
        Self::Stork,
    ];

    /// English display label used in shell output and oracle prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trash => "trash",
            Self::Snail => "apple snail",
            Self::Bug => "midge",
            Self::Grass => "eelgrass",
            Self::Lotus => "lotus",
            Self::Carp => "red carp",
            Self::Frog => "marsh frog",
            Self::Heron => "little egret",
            Self::Stork => "oriental stork",
        }
    }

    /// Emoji glyph shown on the grid.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Trash => "🗑️",
            Self::Snail => "🐌",
            Self::Bug => "🦟",
            Self::Grass => "🌿",
            Self::Lotus => "🌺",
            Self::Carp => "🐟",
            Self::Frog => "🐸",
            Self::Heron => "🦢",
            Self::Stork => "🦩",
        }
    }

    /// Reports whether the kind is a passive hazard seeded by levels.
    #[must_use]
    pub const fn is_hazard(self) -> bool {
        matches!(self, Self::Trash | Self::Snail)
    }

    /// Reports whether the kind is the neutral pest.
    #[must_use]
    pub const fn is_pest(self) -> bool {
        matches!(self, Self::Bug)
    }

    /// Budget charged for clearing this occupant off a cell.
    #[must_use]
    pub const fn clearing_cost(self) -> u32 {
        match self {
            Self::Trash => 20,
            _ => 10,
        }
    }

    /// Score bonus awarded for clearing this occupant.
    ///
    /// Clearing a placed entity earns nothing; undoing a mistake still costs
    /// budget.
    #[must_use]
    pub const fn clearing_points(self) -> u32 {
        match self {
            Self::Trash => 100,
            Self::Snail => 50,
            _ => 0,
        }
    }

    /// The placeable counterpart of this kind, when it can be bought.
    #[must_use]
    pub const fn placeable(self) -> Option<PlaceableKind> {
        match self {
            Self::Grass => Some(PlaceableKind::Grass),
            Self::Lotus => Some(PlaceableKind::Lotus),
            Self::Carp => Some(PlaceableKind::Carp),
            Self::Frog => Some(PlaceableKind::Frog),
            Self::Heron => Some(PlaceableKind::Heron),
            Self::Stork => Some(PlaceableKind::Stork),
            Self::Trash | Self::Snail | Self::Bug => None,
        }
    }
}

/// Placeable subset of [`EntityKind`].
///
/// Every variant carries a purchase cost and resolves to exactly one
/// placement rule, so "tool with no rule entry" is unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceableKind {
    /// Eelgrass producer.
    Grass,
    /// Lotus producer.
    Lotus,
    /// Red carp consumer.
    Carp,
    /// Marsh frog predator.
    Frog,
    /// Little egret consumer.
    Heron,
    /// Oriental stork apex consumer.
    Stork,
}

impl PlaceableKind {
    /// Every placeable kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Grass,
        Self::Lotus,
        Self::Carp,
        Self::Frog,
        Self::Heron,
        Self::Stork,
    ];

    /// The entity kind placed into a cell by this tool.
    #[must_use]
    pub const fn entity(self) -> EntityKind {
        match self {
            Self::Grass => EntityKind::Grass,
            Self::Lotus => EntityKind::Lotus,
            Self::Carp => EntityKind::Carp,
            Self::Frog => EntityKind::Frog,
            Self::Heron => EntityKind::Heron,
            Self::Stork => EntityKind::Stork,
        }
    }

    /// Fixed acquisition cost charged on placement.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Grass => 50,
            Self::Lotus => 80,
            Self::Carp => 60,
            Self::Frog => 40,
            Self::Heron => 100,
            Self::Stork => 150,
        }
    }

    /// English display label used in shell output and oracle prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.entity().label()
    }

    /// One-line tool blurb shown in the shell dock.
    #[must_use]
    pub const fn blurb(self) -> &'static str {
        match self {
            Self::Grass => "Producer. Grows only in deep water.",
            Self::Lotus => "Producer. Loves water, needs eelgrass nearby.",
            Self::Carp => "Consumer. Deep water, needs a plant nearby.",
            Self::Frog => "Helper. Eats midges and earns a bounty.",
            Self::Heron => "Consumer. Shallows or shore, needs fish nearby.",
            Self::Stork => "Apex predator. Shore only, needs two fish nearby.",
        }
    }
}

/// Semantic neighbor category referenced by adjacency prerequisites.
///
/// Groups resolve to concrete kind sets in [`NeighborCategory::matches`]
/// rather than being compared by label anywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeighborCategory {
    /// A single concrete entity kind.
    Kind(EntityKind),
    /// Any producer plant: eelgrass or lotus.
    Plant,
    /// Any fish: red carp.
    Fish,
}

impl NeighborCategory {
    /// Reports whether an occupant of the provided kind satisfies the
    /// category.
    #[must_use]
    pub fn matches(self, kind: EntityKind) -> bool {
        match self {
            Self::Kind(required) => required == kind,
            Self::Plant => matches!(kind, EntityKind::Grass | EntityKind::Lotus),
            Self::Fish => matches!(kind, EntityKind::Carp),
        }
    }
}

impl fmt::Display for NeighborCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => write!(f, "{}", kind.label()),
            Self::Plant => write!(f, "plants"),
            Self::Fish => write!(f, "fish"),
        }
    }
}

/// The player's current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Removal tool that clears a cell's occupant for a fee.
    Clean,
    /// Placement tool that buys and places the provided kind.
    Place(PlaceableKind),
}

impl Tool {
    /// English display label for the tool.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Place(kind) => kind.label(),
        }
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Chebyshev distance between two cell coordinates.
    ///
    /// Adjacency prerequisites consider neighbors at distance one, covering
    /// all eight surrounding cells.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let rows = self.row.abs_diff(other.row);
        let columns = self.column.abs_diff(other.column);
        rows.max(columns)
    }
}

/// Rectangular dimensions of a level grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    rows: u32,
    columns: u32,
}

impl GridSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells covered by the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Reports whether the provided coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Row-major storage index of the provided coordinate, if in bounds.
    #[must_use]
    pub fn index_of(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }

    /// Iterates every coordinate of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(row, column)))
    }
}

/// Relative offsets of the eight cells within Chebyshev distance one.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Read-only view into a session grid usable by pure systems.
///
/// The terrain and occupant slices are row-major and must both cover the
/// provided size exactly; the world guarantees this for every view it hands
/// out.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    terrain: &'a [Terrain],
    occupants: &'a [Option<EntityKind>],
    size: GridSize,
}

impl<'a> GridView<'a> {
    /// Captures a new view backed by the provided cell slices.
    #[must_use]
    pub const fn new(
        terrain: &'a [Terrain],
        occupants: &'a [Option<EntityKind>],
        size: GridSize,
    ) -> Self {
        Self {
            terrain,
            occupants,
            size,
        }
    }

    /// Dimensions of the viewed grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Terrain of the provided cell, if it lies inside the grid.
    #[must_use]
    pub fn terrain(&self, cell: CellCoord) -> Option<Terrain> {
        self.size
            .index_of(cell)
            .and_then(|index| self.terrain.get(index).copied())
    }

    /// Occupant of the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<EntityKind> {
        self.size
            .index_of(cell)
            .and_then(|index| self.occupants.get(index).copied().flatten())
    }

    /// Reports whether the cell lies inside the grid and holds no occupant.
    #[must_use]
    pub fn is_empty(&self, cell: CellCoord) -> bool {
        self.size
            .index_of(cell)
            .is_some_and(|index| self.occupants.get(index).copied().flatten().is_none())
    }

    /// Iterates every cell in row-major order with its terrain and occupant.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, Terrain, Option<EntityKind>)> + 'a {
        let view = *self;
        view.size.cells().filter_map(move |cell| {
            let index = view.size.index_of(cell)?;
            let terrain = view.terrain.get(index).copied()?;
            let occupant = view.occupants.get(index).copied().flatten();
            Some((cell, terrain, occupant))
        })
    }

    /// Enumerates the 8-connected neighbors of a cell, clipped at the edges.
    ///
    /// Out-of-bounds neighbors do not exist; they are never treated as
    /// present-but-empty.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
        let size = self.size;
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |(row_delta, column_delta)| {
                let row = cell.row().checked_add_signed(*row_delta)?;
                let column = cell.column().checked_add_signed(*column_delta)?;
                let candidate = CellCoord::new(row, column);
                size.contains(candidate).then_some(candidate)
            })
    }

    /// Counts occupants of the provided kind across the whole grid.
    #[must_use]
    pub fn population(&self, kind: EntityKind) -> u32 {
        let count = self
            .occupants
            .iter()
            .filter(|occupant| **occupant == Some(kind))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

/// Requirement that a minimum number of one entity kind inhabit the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissionTarget {
    kind: EntityKind,
    required: u32,
}

impl MissionTarget {
    /// Creates a new mission target.
    #[must_use]
    pub const fn new(kind: EntityKind, required: u32) -> Self {
        Self { kind, required }
    }

    /// Entity kind the target counts.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Minimum population required for the target to be met.
    #[must_use]
    pub const fn required(&self) -> u32 {
        self.required
    }
}

/// Progress toward a single mission target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetProgress {
    /// Entity kind the target counts.
    pub kind: EntityKind,
    /// Minimum population required for the target to be met.
    pub required: u32,
    /// Current population of the kind on the grid.
    pub current: u32,
}

impl TargetProgress {
    /// Reports whether the current population satisfies the target.
    #[must_use]
    pub const fn is_met(&self) -> bool {
        self.current >= self.required
    }
}

/// Evaluation of every mission target against a live grid.
///
/// Always carries one entry per target so the shell can display per-target
/// counts regardless of overall completion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MissionProgress {
    entries: Vec<TargetProgress>,
}

impl MissionProgress {
    /// Creates a progress record from per-target entries.
    #[must_use]
    pub fn new(entries: Vec<TargetProgress>) -> Self {
        Self { entries }
    }

    /// Per-target progress entries, in mission declaration order.
    #[must_use]
    pub fn entries(&self) -> &[TargetProgress] {
        &self.entries
    }

    /// Reports whether every target is met simultaneously.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(TargetProgress::is_met)
    }
}

/// Identifier assigned to a level template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelId(u32);

impl LevelId {
    /// Creates a new level identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Correlation token tagging an external content request with the session it
/// was issued for.
///
/// Tokens come from a single monotonic counter that is never reset, so a
/// token from a superseded session can never collide with a live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Creates a new request token with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the token.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Narrative level-completion summary presented as the village newspaper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    /// Front-page headline.
    pub headline: String,
    /// Article body praising the restoration work.
    pub body: String,
    /// "Star of the day" interview quote.
    pub interview: String,
}

impl LevelSummary {
    /// Static fallback published verbatim when the narrator is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            headline: "Wetland Bounces Back!".to_owned(),
            body: "Thanks to the little warden's hard work, the water runs \
                   clear again. Everyone agrees this is the finest wetland \
                   park around."
                .to_owned(),
            interview: "The marsh frog says: ribbit! Splendid!".to_owned(),
        }
    }
}

/// Observable lifecycle phase of the live session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// The session accepts tool selection, actions, and hint requests.
    Active,
    /// The mission is accomplished; the session is frozen awaiting summary
    /// content.
    Completing,
    /// The final level was cleared; the run is over.
    Finished,
}

/// Reasons a placement request may be rejected by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementRejection {
    /// The target coordinate lies outside the level grid.
    OutOfBounds,
    /// The session no longer accepts actions.
    SessionClosed,
    /// The cell's terrain is not in the tool's allowed set.
    TerrainUnsuitable,
    /// The cell already holds an occupant.
    Occupied,
    /// An invasive snail holds the cell; only removal can clear it.
    OccupiedByInvasive,
    /// A pest holds the cell and the tool is not its predator.
    PestInterference,
    /// Too few neighboring cells satisfy the ecological prerequisite.
    MissingNeighbor {
        /// Unmet neighbor category, for message formatting.
        category: NeighborCategory,
        /// Minimum matching neighbor count the rule demands.
        required: u32,
    },
    /// The session budget cannot cover the tool's cost.
    InsufficientFunds {
        /// Cost the placement would have charged.
        cost: u32,
        /// Balance available when the request was made.
        balance: u32,
    },
}

impl fmt::Display for PlacementRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "that spot is outside the wetland"),
            Self::SessionClosed => write!(f, "the level is already wrapped up"),
            Self::TerrainUnsuitable => write!(f, "the terrain is unsuitable"),
            Self::Occupied => write!(f, "something already lives here"),
            Self::OccupiedByInvasive => write!(f, "an apple snail has taken over this spot"),
            Self::PestInterference => write!(f, "midges are swarming here"),
            Self::MissingNeighbor { category, required } => {
                write!(f, "needs {required} neighboring {category}")
            }
            Self::InsufficientFunds { cost, balance } => {
                write!(f, "not enough funds (need ¥{cost}, have ¥{balance})")
            }
        }
    }
}

/// Reasons a removal request may be rejected by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalRejection {
    /// The target coordinate lies outside the level grid.
    OutOfBounds,
    /// The session no longer accepts actions.
    SessionClosed,
    /// The session budget cannot cover the clearing fee.
    InsufficientFunds {
        /// Fee the removal would have charged.
        cost: u32,
        /// Balance available when the request was made.
        balance: u32,
    },
}

impl fmt::Display for RemovalRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "that spot is outside the wetland"),
            Self::SessionClosed => write!(f, "the level is already wrapped up"),
            Self::InsufficientFunds { cost, balance } => {
                write!(f, "not enough funds (need ¥{cost}, have ¥{balance})")
            }
        }
    }
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Changes the player's selected tool; `None` returns to inspect mode.
    SelectTool {
        /// Tool to activate, or `None` to deselect.
        tool: Option<Tool>,
    },
    /// Applies the selected tool to the provided cell, or inspects the cell
    /// when no tool is selected.
    Act {
        /// Target cell of the action.
        cell: CellCoord,
    },
    /// Requests an advisory placement hint from the external narrator.
    RequestHint,
    /// Discards the live session and re-instantiates the current level
    /// template.
    Reset,
    /// Delivers externally generated level-summary content.
    ///
    /// `None` publishes the static fallback so advancement never blocks on
    /// the narrator.
    DeliverSummary {
        /// Token the summary request was issued with.
        token: RequestToken,
        /// Generated summary, or `None` when the narrator failed.
        summary: Option<LevelSummary>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the selected tool changed.
    ToolSelected {
        /// Tool now active, or `None` for inspect mode.
        tool: Option<Tool>,
    },
    /// Reports a read-only inspection of a cell, tagged for flavor lookup.
    Inspected {
        /// Token correlating the narrator's flavor response.
        token: RequestToken,
        /// Cell the player inspected.
        cell: CellCoord,
        /// Occupant found on the cell, if any.
        occupant: Option<EntityKind>,
    },
    /// Confirms an advisory hint was requested from the narrator.
    HintRequested {
        /// Token correlating the narrator's hint response.
        token: RequestToken,
    },
    /// Confirms that an entity was placed into the wetland.
    EntityPlaced {
        /// Cell the entity now occupies.
        cell: CellCoord,
        /// Kind that was placed.
        kind: PlaceableKind,
    },
    /// Confirms that an occupant was cleared off a cell.
    EntityCleared {
        /// Cell that is now empty.
        cell: CellCoord,
        /// Kind that was removed.
        kind: EntityKind,
    },
    /// Reports that the budget decreased.
    BudgetDebited {
        /// Amount charged.
        amount: u32,
        /// Balance remaining after the charge.
        balance: u32,
    },
    /// Reports a predation bounty credited on top of the placement charge.
    BountyAwarded {
        /// Bounty amount credited.
        amount: u32,
        /// Balance after the credit.
        balance: u32,
    },
    /// Reports points added to the session score.
    ScoreAwarded {
        /// Points awarded by the triggering action.
        points: u32,
        /// Session score after the award.
        total: u32,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Kind requested for placement.
        kind: PlaceableKind,
        /// Specific reason the placement failed.
        reason: PlacementRejection,
    },
    /// Reports that a removal request was rejected.
    RemovalRejected {
        /// Cell provided in the removal request.
        cell: CellCoord,
        /// Specific reason the removal failed.
        reason: RemovalRejection,
    },
    /// Publishes per-target mission progress after a mutation.
    MissionEvaluated {
        /// Progress toward every mission target.
        progress: MissionProgress,
    },
    /// Announces mission completion and requests summary content.
    ///
    /// Emitted at most once per session instantiation; the session freezes
    /// until the matching summary is delivered.
    MissionAccomplished {
        /// Token the summary delivery must echo.
        token: RequestToken,
        /// Identifier of the completed level.
        level: LevelId,
        /// Session score at completion time.
        score: u32,
        /// Kinds present on the grid, for narrator context.
        inhabitants: Vec<EntityKind>,
    },
    /// Publishes the accepted level summary, delivered or fallback.
    SummaryPublished {
        /// Summary content to present.
        summary: LevelSummary,
    },
    /// Reports that a stale summary delivery was discarded.
    SummaryDiscarded {
        /// Token carried by the discarded delivery.
        token: RequestToken,
    },
    /// Announces that a level session opened (fresh load, advance, or reset).
    LevelOpened {
        /// Identifier of the opened level.
        level: LevelId,
        /// Mission briefing text for the level.
        briefing: String,
    },
    /// Announces that the final level was cleared and the run is over.
    CampaignFinished,
}
