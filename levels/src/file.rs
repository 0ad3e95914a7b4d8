//! TOML campaign files.
//!
//! Campaigns can be authored externally and handed to the shell with
//! `--levels`; the schema mirrors [`LevelDefinition`] field for field and is
//! validated through the same constructor as the built-in campaign.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use wetland_rescue_core::{
    CellCoord, EntityKind, GridSize, LevelId, MissionTarget, Terrain,
};

use crate::{Campaign, CellSeed, LevelDefinition, LevelError};

/// Reasons a campaign file fails to load.
#[derive(Debug, Error)]
pub enum CampaignFileError {
    /// The file could not be read.
    #[error("could not read campaign file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML or does not match the schema.
    #[error("could not parse campaign file: {0}")]
    Parse(#[from] toml::de::Error),
    /// A level in the file failed template validation.
    #[error(transparent)]
    Invalid(#[from] LevelError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CampaignFile {
    #[serde(rename = "level")]
    levels: Vec<LevelFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct LevelFile {
    id: u32,
    budget: u32,
    briefing: String,
    rows: u32,
    columns: u32,
    base_terrain: Terrain,
    #[serde(rename = "target")]
    targets: Vec<TargetFile>,
    #[serde(rename = "seed", default)]
    seeds: Vec<SeedFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TargetFile {
    kind: EntityKind,
    count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct SeedFile {
    row: u32,
    column: u32,
    terrain: Terrain,
    #[serde(default)]
    occupant: Option<EntityKind>,
}

impl LevelFile {
    fn into_definition(self) -> Result<LevelDefinition, LevelError> {
        let targets = self
            .targets
            .iter()
            .map(|target| MissionTarget::new(target.kind, target.count))
            .collect();
        let seeds = self
            .seeds
            .iter()
            .map(|seed| {
                CellSeed::new(
                    CellCoord::new(seed.row, seed.column),
                    seed.terrain,
                    seed.occupant,
                )
            })
            .collect();
        LevelDefinition::new(
            LevelId::new(self.id),
            self.budget,
            self.briefing,
            targets,
            GridSize::new(self.rows, self.columns),
            self.base_terrain,
            seeds,
        )
    }
}

/// Parses a campaign from TOML text.
pub fn parse_campaign(text: &str) -> Result<Campaign, CampaignFileError> {
    let file: CampaignFile = toml::from_str(text)?;
    let levels = file
        .levels
        .into_iter()
        .map(LevelFile::into_definition)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Campaign::new(levels)?)
}

/// Loads a campaign from a TOML file on disk.
pub fn load_campaign(path: &Path) -> Result<Campaign, CampaignFileError> {
    let text = std::fs::read_to_string(path)?;
    parse_campaign(&text)
}

#[cfg(test)]
mod tests {
    use super::{parse_campaign, CampaignFileError};
    use crate::LevelError;
    use wetland_rescue_core::{EntityKind, LevelId, Terrain};

    const SAMPLE: &str = r#"
        [[level]]
        id = 7
        budget = 250
        briefing = "Revive the old paddy pond."
        rows = 3
        columns = 5
        base-terrain = "shallow-water"

        [[level.target]]
        kind = "lotus"
        count = 1

        [[level.seed]]
        row = 0
        column = 4
        terrain = "land"
        occupant = "trash"
    "#;

    #[test]
    fn parses_a_single_level_campaign() {
        let campaign = parse_campaign(SAMPLE).expect("sample parses");
        assert_eq!(campaign.len(), 1);

        let level = &campaign.levels()[0];
        assert_eq!(level.id(), LevelId::new(7));
        assert_eq!(level.starting_budget(), 250);
        assert_eq!(level.size().rows(), 3);
        assert_eq!(level.size().columns(), 5);
        assert_eq!(level.base_terrain(), Terrain::ShallowWater);
        assert_eq!(level.targets().len(), 1);
        assert_eq!(level.seeds().len(), 1);
        assert_eq!(level.seeds()[0].occupant(), Some(EntityKind::Trash));
    }

    #[test]
    fn invalid_levels_fail_through_template_validation() {
        let oob = SAMPLE.replace("row = 0", "row = 9");
        assert!(matches!(
            parse_campaign(&oob),
            Err(CampaignFileError::Invalid(LevelError::SeedOutOfBounds { .. }))
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let extra = format!("{SAMPLE}\n[[level.bonus]]\nvalue = 1\n");
        assert!(matches!(
            parse_campaign(&extra),
            Err(CampaignFileError::Parse(_))
        ));
    }

    #[test]
    fn empty_files_are_rejected() {
        assert!(parse_campaign("").is_err());
    }
}
