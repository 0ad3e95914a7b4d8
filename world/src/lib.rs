#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for the EcoSim wetland.
//!
//! The world owns the campaign and exactly one live level session. Adapters
//! submit [`Command`] values through [`apply`]; every observable consequence
//! is appended to the caller's event buffer. Rejections are events carrying
//! structured reasons, never panics, so `apply` is total over adapter input.
//! Each action is validated in full before the first mutation lands.

mod grid;
mod ledger;

use wetland_rescue_core::{
    CellCoord, Command, EntityKind, Event, LevelSummary, PlaceableKind, PlacementRejection,
    RemovalRejection, RequestToken, SessionPhase, Tool, PLACEMENT_POINTS, PREDATION_BOUNTY,
    PREDATION_POINTS, WELCOME_BANNER,
};
use wetland_rescue_levels::Campaign;
use wetland_rescue_system_missions as missions;
use wetland_rescue_system_placement::Ruleset;

use crate::{
    grid::Grid,
    ledger::{Budget, Score},
};

/// Live state of one level attempt.
#[derive(Debug)]
struct Session {
    grid: Grid,
    budget: Budget,
    score: Score,
    selected: Option<Tool>,
    phase: SessionPhase,
    pending_summary: Option<RequestToken>,
}

impl Session {
    /// Instantiates a fresh session from the level at `index`.
    ///
    /// Loading transitions straight to `Active`: the grid is deep-copied from
    /// the template, the budget matches the template, the score is zero, no
    /// tool is selected, and the completion latch is off.
    fn open(campaign: &Campaign, index: usize) -> Self {
        let level = &campaign.levels()[index];
        Self {
            grid: Grid::from_level(level),
            budget: Budget::new(level.starting_budget()),
            score: Score::new(),
            selected: None,
            phase: SessionPhase::Active,
            pending_summary: None,
        }
    }
}

/// Authoritative world owning the campaign and the live level session.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    campaign: Campaign,
    ruleset: Ruleset,
    level_index: usize,
    session: Session,
    token_counter: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(Campaign::standard())
    }
}

impl World {
    /// Creates a world running the provided campaign, opening its first
    /// level immediately.
    #[must_use]
    pub fn new(campaign: Campaign) -> Self {
        let session = Session::open(&campaign, 0);
        Self {
            banner: WELCOME_BANNER,
            campaign,
            ruleset: Ruleset::standard(),
            level_index: 0,
            session,
            token_counter: 0,
        }
    }

    /// Allocates the next correlation token.
    ///
    /// The counter spans the world's whole lifetime, so tokens issued by a
    /// superseded session can never collide with live ones.
    fn allocate_token(&mut self) -> RequestToken {
        self.token_counter += 1;
        RequestToken::new(self.token_counter)
    }

    fn select_tool(&mut self, tool: Option<Tool>, out_events: &mut Vec<Event>) {
        if self.session.phase != SessionPhase::Active {
            return;
        }
        self.session.selected = tool;
        out_events.push(Event::ToolSelected { tool });
    }

    fn request_hint(&mut self, out_events: &mut Vec<Event>) {
        if self.session.phase != SessionPhase::Active {
            return;
        }
        let token = self.allocate_token();
        out_events.push(Event::HintRequested { token });
    }

    fn act(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if self.session.phase != SessionPhase::Active {
            match self.session.selected {
                Some(Tool::Place(kind)) => out_events.push(Event::PlacementRejected {
                    cell,
                    kind,
                    reason: PlacementRejection::SessionClosed,
                }),
                Some(Tool::Clean) => out_events.push(Event::RemovalRejected {
                    cell,
                    reason: RemovalRejection::SessionClosed,
                }),
                None => {}
            }
            return;
        }

        match self.session.selected {
            None => self.inspect(cell, out_events),
            Some(Tool::Clean) => self.clean(cell, out_events),
            Some(Tool::Place(kind)) => self.place(kind, cell, out_events),
        }
    }

    fn inspect(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if !self.session.grid.size().contains(cell) {
            return;
        }
        let occupant = self.session.grid.occupant(cell);
        let token = self.allocate_token();
        out_events.push(Event::Inspected {
            token,
            cell,
            occupant,
        });
    }

    fn clean(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if !self.session.grid.size().contains(cell) {
            out_events.push(Event::RemovalRejected {
                cell,
                reason: RemovalRejection::OutOfBounds,
            });
            return;
        }
        let Some(kind) = self.session.grid.occupant(cell) else {
            // Sweeping an empty cell is a silent no-op, free of charge.
            return;
        };

        let cost = kind.clearing_cost();
        if !self.session.budget.try_spend(cost) {
            out_events.push(Event::RemovalRejected {
                cell,
                reason: RemovalRejection::InsufficientFunds {
                    cost,
                    balance: self.session.budget.balance(),
                },
            });
            return;
        }

        self.session.grid.set_occupant(cell, None);
        out_events.push(Event::EntityCleared { cell, kind });
        out_events.push(Event::BudgetDebited {
            amount: cost,
            balance: self.session.budget.balance(),
        });
        let points = kind.clearing_points();
        if points > 0 {
            let total = self.session.score.award(points);
            out_events.push(Event::ScoreAwarded { points, total });
        }

        self.evaluate_mission(out_events);
    }

    fn place(&mut self, kind: PlaceableKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        if !self.session.grid.size().contains(cell) {
            out_events.push(Event::PlacementRejected {
                cell,
                kind,
                reason: PlacementRejection::OutOfBounds,
            });
            return;
        }

        // Structural validation runs before affordability, so a badly placed
        // tool is reported as such even when the player is also broke.
        if let Err(reason) = self.ruleset.evaluate(kind, cell, &self.session.grid.view()) {
            out_events.push(Event::PlacementRejected { cell, kind, reason });
            return;
        }

        let predation = kind == PlaceableKind::Frog
            && self
                .session
                .grid
                .occupant(cell)
                .is_some_and(EntityKind::is_pest);

        let cost = kind.cost();
        if !self.session.budget.try_spend(cost) {
            out_events.push(Event::PlacementRejected {
                cell,
                kind,
                reason: PlacementRejection::InsufficientFunds {
                    cost,
                    balance: self.session.budget.balance(),
                },
            });
            return;
        }

        self.session.grid.set_occupant(cell, Some(kind.entity()));
        out_events.push(Event::EntityPlaced { cell, kind });
        out_events.push(Event::BudgetDebited {
            amount: cost,
            balance: self.session.budget.balance(),
        });

        if predation {
            self.session.budget.credit(PREDATION_BOUNTY);
            out_events.push(Event::BountyAwarded {
                amount: PREDATION_BOUNTY,
                balance: self.session.budget.balance(),
            });
            let total = self.session.score.award(PREDATION_POINTS);
            out_events.push(Event::ScoreAwarded {
                points: PREDATION_POINTS,
                total,
            });
        } else {
            let total = self.session.score.award(PLACEMENT_POINTS);
            out_events.push(Event::ScoreAwarded {
                points: PLACEMENT_POINTS,
                total,
            });
        }

        self.evaluate_mission(out_events);
    }

    /// Re-evaluates the mission after a successful mutation.
    ///
    /// The phase check is the completion latch: win detection only fires in
    /// `Active`, and the transition to `Completing` is one-way until a
    /// summary delivery or reset re-instantiates the session.
    fn evaluate_mission(&mut self, out_events: &mut Vec<Event>) {
        let progress = {
            let level = &self.campaign.levels()[self.level_index];
            missions::evaluate(&self.session.grid.view(), level.targets())
        };
        let complete = progress.is_complete();
        out_events.push(Event::MissionEvaluated { progress });

        if !complete || self.session.phase != SessionPhase::Active {
            return;
        }

        let token = self.allocate_token();
        self.session.phase = SessionPhase::Completing;
        self.session.pending_summary = Some(token);
        let inhabitants: Vec<EntityKind> = self
            .session
            .grid
            .view()
            .cells()
            .filter_map(|(_, _, occupant)| occupant)
            .collect();
        out_events.push(Event::MissionAccomplished {
            token,
            level: self.campaign.levels()[self.level_index].id(),
            score: self.session.score.total(),
            inhabitants,
        });
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        if self.session.phase == SessionPhase::Finished {
            return;
        }
        self.open_level(self.level_index, out_events);
    }

    fn deliver_summary(
        &mut self,
        token: RequestToken,
        summary: Option<LevelSummary>,
        out_events: &mut Vec<Event>,
    ) {
        if self.session.phase != SessionPhase::Completing
            || self.session.pending_summary != Some(token)
        {
            out_events.push(Event::SummaryDiscarded { token });
            return;
        }

        self.session.pending_summary = None;
        let summary = summary.unwrap_or_else(LevelSummary::fallback);
        out_events.push(Event::SummaryPublished { summary });

        let next = self.level_index + 1;
        if next < self.campaign.len() {
            self.open_level(next, out_events);
        } else {
            self.session.phase = SessionPhase::Finished;
            out_events.push(Event::CampaignFinished);
        }
    }

    fn open_level(&mut self, index: usize, out_events: &mut Vec<Event>) {
        self.level_index = index;
        self.session = Session::open(&self.campaign, index);
        let level = &self.campaign.levels()[index];
        out_events.push(Event::LevelOpened {
            level: level.id(),
            briefing: level.briefing().to_owned(),
        });
    }
}

/// Applies the provided command to the world, mutating state
/// deterministically and appending every resulting event.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SelectTool { tool } => world.select_tool(tool, out_events),
        Command::Act { cell } => world.act(cell, out_events),
        Command::RequestHint => world.request_hint(out_events),
        Command::Reset => world.reset(out_events),
        Command::DeliverSummary { token, summary } => {
            world.deliver_summary(token, summary, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use wetland_rescue_core::{GridView, MissionProgress, RequestToken, SessionPhase, Tool};
    use wetland_rescue_levels::LevelDefinition;
    use wetland_rescue_system_missions as missions;

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Captures a read-only view of the live session grid.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        world.session.grid.view()
    }

    /// Current budget balance.
    #[must_use]
    pub fn budget(world: &World) -> u32 {
        world.session.budget.balance()
    }

    /// Current session score.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.session.score.total()
    }

    /// Tool the player currently has selected, if any.
    #[must_use]
    pub fn selected_tool(world: &World) -> Option<Tool> {
        world.session.selected
    }

    /// Lifecycle phase of the live session.
    #[must_use]
    pub fn phase(world: &World) -> SessionPhase {
        world.session.phase
    }

    /// Template of the level currently in play.
    #[must_use]
    pub fn level(world: &World) -> &LevelDefinition {
        &world.campaign.levels()[world.level_index]
    }

    /// Zero-based index of the level in play and the campaign length.
    #[must_use]
    pub fn campaign_position(world: &World) -> (usize, usize) {
        (world.level_index, world.campaign.len())
    }

    /// Evaluates mission progress for the live grid.
    #[must_use]
    pub fn mission_progress(world: &World) -> MissionProgress {
        missions::evaluate(&grid_view(world), level(world).targets())
    }

    /// Token of the outstanding summary request while the session completes.
    #[must_use]
    pub fn pending_summary(world: &World) -> Option<RequestToken> {
        world.session.pending_summary
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, query, World};
    use wetland_rescue_core::{
        CellCoord, Command, Event, SessionPhase, Tool,
    };

    fn drive(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    #[test]
    fn default_world_opens_the_reference_campaign() {
        let world = World::default();
        assert_eq!(query::budget(&world), 400);
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::phase(&world), SessionPhase::Active);
        assert_eq!(query::campaign_position(&world), (0, 2));
        assert!(query::selected_tool(&world).is_none());
        assert_eq!(query::welcome_banner(&world), "Welcome to the wetland, little warden.");
    }

    #[test]
    fn tool_selection_round_trips_through_events_and_queries() {
        let mut world = World::default();

        let events = drive(&mut world, Command::SelectTool {
            tool: Some(Tool::Clean),
        });
        assert_eq!(events, vec![Event::ToolSelected {
            tool: Some(Tool::Clean),
        }]);
        assert_eq!(query::selected_tool(&world), Some(Tool::Clean));

        let events = drive(&mut world, Command::SelectTool { tool: None });
        assert_eq!(events, vec![Event::ToolSelected { tool: None }]);
        assert!(query::selected_tool(&world).is_none());
    }

    #[test]
    fn inspecting_allocates_fresh_tokens() {
        let mut world = World::default();
        let first = drive(&mut world, Command::Act {
            cell: CellCoord::new(0, 0),
        });
        let second = drive(&mut world, Command::Act {
            cell: CellCoord::new(0, 0),
        });

        let token_of = |events: &[Event]| match events {
            [Event::Inspected { token, .. }] => *token,
            other => panic!("expected a single inspection event, got {other:?}"),
        };
        assert!(token_of(&second) > token_of(&first));
    }

    #[test]
    fn inspecting_outside_the_grid_is_ignored() {
        let mut world = World::default();
        let events = drive(&mut world, Command::Act {
            cell: CellCoord::new(40, 40),
        });
        assert!(events.is_empty());
    }

    #[test]
    fn hint_requests_are_tokenized() {
        let mut world = World::default();
        let events = drive(&mut world, Command::RequestHint);
        assert!(matches!(events.as_slice(), [Event::HintRequested { .. }]));
    }
}
