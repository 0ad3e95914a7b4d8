#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives an EcoSim wetland session.
//!
//! The shell translates typed commands into world [`Command`] values, renders
//! the resulting events as text, and wires the narrator oracle in on the
//! session's correlation tokens.

mod codes;

use std::{
    io::{self, BufRead, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use wetland_rescue_core::{
    CellCoord, Command, EntityKind, Event, LevelSummary, MissionProgress, PlaceableKind, Terrain,
    Tool,
};
use wetland_rescue_levels::{load_campaign, Campaign};
use wetland_rescue_oracle::{
    describe_grid, HintContext, Narrator, StaticNarrator, SummaryContext, EMPTY_CELL_FLAVOR,
    FALLBACK_FLAVOR, FALLBACK_HINT,
};
use wetland_rescue_world::{apply, query, World};

use crate::codes::WetlandSnapshot;

/// Command-line options for the wetland shell.
#[derive(Debug, Parser)]
#[command(
    name = "wetland-rescue",
    about = "Grid-based wetland restoration sim",
    version
)]
struct Options {
    /// Plays a TOML campaign file instead of the built-in levels.
    #[arg(long, value_name = "FILE")]
    levels: Option<PathBuf>,

    /// Runs shell commands from a file instead of reading stdin.
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,
}

/// Entry point for the wetland command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = Options::parse();
    let campaign = match &options.levels {
        Some(path) => load_campaign(path)
            .with_context(|| format!("loading campaign from {}", path.display()))?,
        None => Campaign::standard(),
    };
    info!(levels = campaign.len(), "campaign ready");

    let mut shell = Shell::new(World::new(campaign), StaticNarrator);
    println!("{}", query::welcome_banner(shell.world()));
    shell.print_level();

    match &options.script {
        Some(path) => shell.run_script(path),
        None => shell.run_interactive(),
    }
}

/// Interactive shell wrapping one world and one narrator.
struct Shell<N> {
    world: World,
    narrator: N,
}

impl<N: Narrator> Shell<N> {
    fn new(world: World, narrator: N) -> Self {
        Self { world, narrator }
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn run_interactive(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if !self.handle_line(line.trim()) {
                break;
            }
        }
        Ok(())
    }

    fn run_script(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            println!("> {line}");
            if !self.handle_line(line) {
                break;
            }
        }
        Ok(())
    }

    /// Handles one typed command; returns false when the player leaves.
    fn handle_line(&mut self, line: &str) -> bool {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return true;
        };
        match verb {
            "quit" | "exit" => return false,
            "help" => print_help(),
            "grid" => self.print_grid(),
            "status" => self.print_status(),
            "tool" => match words.next().and_then(parse_tool) {
                Some(selection) => self.submit(Command::SelectTool { tool: selection }),
                None => println!("Usage: tool <clean|grass|lotus|carp|frog|heron|stork|none>"),
            },
            "act" => match parse_cell(words.next(), words.next()) {
                Some(cell) => self.submit(Command::Act { cell }),
                None => println!("Usage: act <row> <column>"),
            },
            "hint" => self.submit(Command::RequestHint),
            "reset" => self.submit(Command::Reset),
            "share" => {
                let code = WetlandSnapshot::from_view(&query::grid_view(&self.world)).encode();
                println!("{code}");
            }
            "decode" => match words.next() {
                Some(code) => print_shared(code),
                None => println!("Usage: decode <share-code>"),
            },
            other => println!("Unknown command '{other}'; try 'help'."),
        }
        true
    }

    fn submit(&mut self, command: Command) {
        let mut events = Vec::new();
        apply(&mut self.world, command, &mut events);
        self.react(events);
    }

    fn react(&mut self, events: Vec<Event>) {
        for event in events {
            debug!(?event, "world event");
            match event {
                Event::ToolSelected { tool: Some(tool) } => {
                    println!("Tool in hand: {}.", tool.label());
                }
                Event::ToolSelected { tool: None } => {
                    println!("Tool put away; tap a cell to chat with its resident.");
                }
                Event::Inspected { occupant, .. } => self.print_flavor(occupant),
                Event::HintRequested { token } => {
                    debug!(token = token.get(), "hint requested");
                    self.print_hint();
                }
                Event::EntityPlaced { cell, kind } => {
                    println!(
                        "Settled {} into ({}, {}).",
                        kind.label(),
                        cell.row(),
                        cell.column()
                    );
                }
                Event::EntityCleared { cell, kind } => {
                    println!(
                        "Cleared {} from ({}, {}).",
                        kind.label(),
                        cell.row(),
                        cell.column()
                    );
                }
                Event::BudgetDebited { amount, balance } => {
                    println!("  -¥{amount} (balance ¥{balance})");
                }
                Event::BountyAwarded { amount, balance } => {
                    println!("  +¥{amount} bounty! (balance ¥{balance})");
                }
                Event::ScoreAwarded { points, total } => {
                    println!("  +{points} points (score {total})");
                }
                Event::PlacementRejected { cell, kind, reason } => {
                    println!(
                        "Cannot place {} at ({}, {}): {reason}.",
                        kind.label(),
                        cell.row(),
                        cell.column()
                    );
                }
                Event::RemovalRejected { cell, reason } => {
                    println!(
                        "Cannot clean ({}, {}): {reason}.",
                        cell.row(),
                        cell.column()
                    );
                }
                Event::MissionEvaluated { progress } => print_progress(&progress),
                Event::MissionAccomplished {
                    token,
                    level,
                    score,
                    inhabitants,
                } => {
                    println!("Mission accomplished! Final score {score}.");
                    let context = SummaryContext {
                        level,
                        score,
                        inhabitants,
                    };
                    let summary = self.narrator.level_summary(&context);
                    if summary.is_none() {
                        warn!("narrator unavailable; publishing the stock summary");
                    }
                    self.submit(Command::DeliverSummary { token, summary });
                }
                Event::SummaryPublished { summary } => print_newspaper(&summary),
                Event::SummaryDiscarded { token } => {
                    debug!(token = token.get(), "stale summary discarded");
                }
                Event::LevelOpened { .. } => self.print_level(),
                Event::CampaignFinished => {
                    println!("The whole wetland is thriving. Thank you, warden!");
                }
            }
        }
    }

    fn print_flavor(&self, occupant: Option<EntityKind>) {
        match occupant {
            Some(kind) => {
                let line = self
                    .narrator
                    .entity_flavor(kind.label())
                    .unwrap_or_else(|| FALLBACK_FLAVOR.to_owned());
                println!("{} {}: \"{line}\"", kind.emoji(), kind.label());
            }
            None => println!("{EMPTY_CELL_FLAVOR}"),
        }
    }

    fn print_hint(&self) {
        let context = HintContext {
            grid: describe_grid(&query::grid_view(&self.world)),
            briefing: query::level(&self.world).briefing().to_owned(),
            budget: query::budget(&self.world),
        };
        let hint = self
            .narrator
            .placement_hint(&context)
            .unwrap_or_else(|| FALLBACK_HINT.to_owned());
        println!("Hint: {hint}");
    }

    fn print_level(&self) {
        let level = query::level(&self.world);
        let (index, total) = query::campaign_position(&self.world);
        println!();
        println!("=== Level {} of {} ===", index + 1, total);
        println!("{}", level.briefing());
        self.print_status();
        self.print_grid();
        print_tools();
    }

    fn print_status(&self) {
        println!(
            "Budget ¥{}  Score {}",
            query::budget(&self.world),
            query::score(&self.world)
        );
        print_progress(&query::mission_progress(&self.world));
    }

    fn print_grid(&self) {
        let view = query::grid_view(&self.world);
        let size = view.size();
        let mut header = String::from("    ");
        for column in 0..size.columns() {
            header.push_str(&format!("{column:^4}"));
        }
        println!("{header}");
        for row in 0..size.rows() {
            let mut line = format!("{row:^4}");
            for column in 0..size.columns() {
                let cell = CellCoord::new(row, column);
                let glyph = view
                    .occupant(cell)
                    .map_or_else(|| terrain_glyph(view.terrain(cell)), EntityKind::emoji);
                line.push_str(&format!("{glyph:^4}"));
            }
            println!("{line}");
        }
    }
}

fn print_progress(progress: &MissionProgress) {
    let entries: Vec<String> = progress
        .entries()
        .iter()
        .map(|entry| format!("{} {}/{}", entry.kind.emoji(), entry.current, entry.required))
        .collect();
    println!("Mission: {}", entries.join("  "));
}

fn print_tools() {
    println!("Tools: clean (fee per clear) and:");
    for kind in PlaceableKind::ALL {
        println!(
            "  {} {} ¥{} - {}",
            kind.entity().emoji(),
            kind.label(),
            kind.cost(),
            kind.blurb()
        );
    }
}

fn print_newspaper(summary: &LevelSummary) {
    println!();
    println!("====== THE WETLAND DAILY ======");
    println!("{}", summary.headline);
    println!();
    println!("{}", summary.body);
    println!();
    println!("Star of the day: {}", summary.interview);
    println!("===============================");
}

fn print_shared(code: &str) {
    match WetlandSnapshot::decode(code) {
        Ok(snapshot) => {
            println!("A {}x{} wetland:", snapshot.rows, snapshot.columns);
            for row in 0..snapshot.rows {
                let mut line = String::new();
                for column in 0..snapshot.columns {
                    let index = (row * snapshot.columns + column) as usize;
                    let record = &snapshot.cells[index];
                    let glyph = record
                        .occupant
                        .map_or_else(|| terrain_glyph(Some(record.terrain)), EntityKind::emoji);
                    line.push_str(&format!("{glyph:^4}"));
                }
                println!("{line}");
            }
        }
        Err(error) => println!("Could not read share code: {error}"),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  tool <name|none>   pick a tool (clean, grass, lotus, carp, frog, heron, stork)");
    println!("  act <row> <col>    use the tool on a cell, or chat when no tool is held");
    println!("  hint               ask the narrator for advice");
    println!("  status             show budget, score, and mission progress");
    println!("  grid               redraw the wetland");
    println!("  reset              restart the current level");
    println!("  share              print a share code for the current wetland");
    println!("  decode <code>      preview a shared wetland");
    println!("  quit               leave the sim");
}

fn terrain_glyph(terrain: Option<Terrain>) -> &'static str {
    match terrain {
        Some(Terrain::DeepWater) => "≈",
        Some(Terrain::ShallowWater) => "~",
        Some(Terrain::Land) => ".",
        None => " ",
    }
}

fn parse_tool(word: &str) -> Option<Option<Tool>> {
    let tool = match word {
        "none" => return Some(None),
        "clean" => Tool::Clean,
        "grass" | "eelgrass" => Tool::Place(PlaceableKind::Grass),
        "lotus" => Tool::Place(PlaceableKind::Lotus),
        "carp" => Tool::Place(PlaceableKind::Carp),
        "frog" => Tool::Place(PlaceableKind::Frog),
        "heron" | "egret" => Tool::Place(PlaceableKind::Heron),
        "stork" => Tool::Place(PlaceableKind::Stork),
        _ => return None,
    };
    Some(Some(tool))
}

fn parse_cell(row: Option<&str>, column: Option<&str>) -> Option<CellCoord> {
    let row = row?.parse().ok()?;
    let column = column?.parse().ok()?;
    Some(CellCoord::new(row, column))
}
