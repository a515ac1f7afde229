//! Gene naming and the gene-data wire format.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of a gene within a genome.
///
/// A genome holds at most one gene per name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneName {
    /// Body shape. Consumed by the body construction layer.
    Shape,
    /// Twitch schedule while heading towards A.
    ToA,
    /// Twitch schedule while heading towards B.
    ToB,
    /// Twitch schedule while heading towards C.
    ToC,
    /// Twitch timing configuration (slice length, periods, intensity).
    TwitchConfig,
}

impl fmt::Display for GeneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneName::Shape => "Shape",
            GeneName::ToA => "ToA",
            GeneName::ToB => "ToB",
            GeneName::ToC => "ToC",
            GeneName::TwitchConfig => "TwitchConfig",
        };
        f.write_str(name)
    }
}

/// Movement direction of a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Rest,
    ToA,
    ToB,
    ToC,
}

impl Direction {
    /// All directions, `Rest` first.
    pub const ALL: [Direction; 4] = [
        Direction::Rest,
        Direction::ToA,
        Direction::ToB,
        Direction::ToC,
    ];

    /// Directions that carry a twitch schedule.
    pub const MOVING: [Direction; 3] = [Direction::ToA, Direction::ToB, Direction::ToC];

    /// The gene holding this direction's twitch schedule. `Rest` has none.
    pub fn gene_name(self) -> Option<GeneName> {
        match self {
            Direction::Rest => None,
            Direction::ToA => Some(GeneName::ToA),
            Direction::ToB => Some(GeneName::ToB),
            Direction::ToC => Some(GeneName::ToC),
        }
    }
}

/// Serialized form of one gene.
///
/// `gene_string` holds one die symbol per die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneData {
    pub gene_name: GeneName,
    pub tosses: u32,
    pub gene_string: String,
}
