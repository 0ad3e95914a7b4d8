#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use wetland_rescue_core::{EntityKind, GridView, Terrain};

const SNAPSHOT_DOMAIN: &str = "wetland";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "wetland:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Snapshot of a wetland grid suitable for clipboard transfer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WetlandSnapshot {
    /// Number of rows in the grid.
    pub rows: u32,
    /// Number of columns in the grid.
    pub columns: u32,
    /// Cell records in row-major order, one per grid cell.
    pub cells: Vec<CellRecord>,
}

/// Terrain and occupant of a single cell within a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellRecord {
    /// Terrain of the cell.
    pub terrain: Terrain,
    /// Occupant of the cell, if any.
    pub occupant: Option<EntityKind>,
}

#[derive(Serialize, Deserialize)]
struct SerializablePayload {
    cells: Vec<CellRecord>,
}

impl WetlandSnapshot {
    /// Captures a snapshot of the provided grid view.
    pub(crate) fn from_view(view: &GridView<'_>) -> Self {
        let cells = view
            .cells()
            .map(|(_, terrain, occupant)| CellRecord { terrain, occupant })
            .collect();
        Self {
            rows: view.size().rows(),
            columns: view.size().columns(),
            cells,
        }
    }

    /// Encodes the snapshot into a single-line string suitable for clipboard
    /// transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializablePayload {
            cells: self.cells.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("snapshot serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{SNAPSHOT_HEADER}:{}x{}:{encoded}", self.rows, self.columns)
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, ShareCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ShareCodeError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ShareCodeError::MissingPrefix)?;
        let version = parts.next().ok_or(ShareCodeError::MissingVersion)?;
        let dimensions = parts.next().ok_or(ShareCodeError::MissingDimensions)?;
        let payload = parts.next().ok_or(ShareCodeError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
        }

        let (rows, columns) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(ShareCodeError::InvalidEncoding)?;
        let decoded: SerializablePayload =
            serde_json::from_slice(&bytes).map_err(ShareCodeError::InvalidPayload)?;

        let expected = rows as usize * columns as usize;
        if decoded.cells.len() != expected {
            return Err(ShareCodeError::CellCountMismatch {
                expected,
                found: decoded.cells.len(),
            });
        }

        Ok(Self {
            rows,
            columns,
            cells: decoded.cells,
        })
    }
}

/// Errors that can occur while decoding share codes.
#[derive(Debug)]
pub(crate) enum ShareCodeError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    MissingVersion,
    /// The encoded snapshot did not include grid dimensions.
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the encoded snapshot.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
    /// The payload does not cover the declared grid dimensions.
    CellCountMismatch {
        /// Cells the dimensions call for.
        expected: usize,
        /// Cells the payload actually holds.
        found: usize,
    },
}

impl fmt::Display for ShareCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "share code was empty"),
            Self::MissingPrefix => write!(f, "share code is missing the prefix"),
            Self::MissingVersion => write!(f, "share code is missing the version"),
            Self::MissingDimensions => write!(f, "share code is missing the grid dimensions"),
            Self::MissingPayload => write!(f, "share code is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "share prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "share version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse grid dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode share payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse share payload: {error}")
            }
            Self::CellCountMismatch { expected, found } => {
                write!(f, "share payload holds {found} cells, dimensions call for {expected}")
            }
        }
    }
}

impl Error for ShareCodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), ShareCodeError> {
    let (rows, columns) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| ShareCodeError::InvalidDimensions(dimensions.to_owned()))?;

    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| ShareCodeError::InvalidDimensions(dimensions.to_owned()))?;
    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| ShareCodeError::InvalidDimensions(dimensions.to_owned()))?;

    if rows == 0 || columns == 0 {
        return Err(ShareCodeError::InvalidDimensions(dimensions.to_owned()));
    }

    Ok((rows, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wetland_rescue_core::{GridSize, GridView};

    #[test]
    fn round_trip_empty_pond() {
        let size = GridSize::new(2, 3);
        let terrain = vec![Terrain::ShallowWater; size.cell_count()];
        let occupants = vec![None; size.cell_count()];
        let view = GridView::new(&terrain, &occupants, size);

        let snapshot = WetlandSnapshot::from_view(&view);
        let encoded = snapshot.encode();
        assert!(encoded.starts_with(&format!("{SNAPSHOT_HEADER}:2x3:")));

        let decoded = WetlandSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn round_trip_populated_pond() {
        let size = GridSize::new(1, 3);
        let terrain = vec![Terrain::DeepWater, Terrain::ShallowWater, Terrain::Land];
        let occupants = vec![Some(EntityKind::Grass), None, Some(EntityKind::Stork)];
        let view = GridView::new(&terrain, &occupants, size);

        let snapshot = WetlandSnapshot::from_view(&view);
        let decoded = WetlandSnapshot::decode(&snapshot.encode()).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
        assert_eq!(decoded.cells[0].occupant, Some(EntityKind::Grass));
        assert_eq!(decoded.cells[2].terrain, Terrain::Land);
    }

    #[test]
    fn foreign_prefixes_are_rejected() {
        assert!(matches!(
            WetlandSnapshot::decode("garden:v1:2x2:AAAA"),
            Err(ShareCodeError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn future_versions_are_rejected() {
        assert!(matches!(
            WetlandSnapshot::decode("wetland:v9:2x2:AAAA"),
            Err(ShareCodeError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            WetlandSnapshot::decode("wetland:v1:0x4:AAAA"),
            Err(ShareCodeError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn truncated_payloads_are_rejected() {
        let size = GridSize::new(2, 2);
        let terrain = vec![Terrain::Land; size.cell_count()];
        let occupants = vec![None; size.cell_count()];
        let view = GridView::new(&terrain, &occupants, size);

        let encoded = WetlandSnapshot::from_view(&view).encode();
        let lying = encoded.replace(":2x2:", ":3x3:");
        assert!(matches!(
            WetlandSnapshot::decode(&lying),
            Err(ShareCodeError::CellCountMismatch {
                expected: 9,
                found: 4,
            })
        ));
    }

    #[test]
    fn blank_codes_are_rejected() {
        assert!(matches!(
            WetlandSnapshot::decode("   "),
            Err(ShareCodeError::EmptyPayload)
        ));
    }
}
