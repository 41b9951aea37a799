use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::*;

/// Which carving algorithm builds the spanning tree of a maze.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationAlgorithm {
    BinaryTree,
    Sidewinder,
    AldousBroder,
    Wilson,
    HuntAndKill,
    RecursiveBacktracker,
}

impl GenerationAlgorithm {
    pub const ALL: [GenerationAlgorithm; 6] = [GenerationAlgorithm::BinaryTree,
                                               GenerationAlgorithm::Sidewinder,
                                               GenerationAlgorithm::AldousBroder,
                                               GenerationAlgorithm::Wilson,
                                               GenerationAlgorithm::HuntAndKill,
                                               GenerationAlgorithm::RecursiveBacktracker];

    pub fn name(self) -> &'static str {
        match self {
            GenerationAlgorithm::BinaryTree => "binary-tree",
            GenerationAlgorithm::Sidewinder => "sidewinder",
            GenerationAlgorithm::AldousBroder => "aldous-broder",
            GenerationAlgorithm::Wilson => "wilson",
            GenerationAlgorithm::HuntAndKill => "hunt-and-kill",
            GenerationAlgorithm::RecursiveBacktracker => "recursive-backtracker",
        }
    }
}

impl Default for GenerationAlgorithm {
    fn default() -> Self {
        GenerationAlgorithm::RecursiveBacktracker
    }
}

impl fmt::Display for GenerationAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GenerationAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<GenerationAlgorithm> {
        GenerationAlgorithm::ALL
            .iter()
            .cloned()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| ErrorKind::UnknownAlgorithm(s.to_owned()).into())
    }
}

/// Everything needed to (re)generate a maze. Missing fields take their defaults when
/// deserialized, so a host only has to name what it changes.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    pub algorithm: GenerationAlgorithm,
    /// Probability of opening up each dead end after carving, 0.0 keeps a perfect maze.
    pub braid: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        MazeConfig {
            width: 20,
            height: 20,
            seed: 0,
            algorithm: GenerationAlgorithm::default(),
            braid: 0.0,
        }
    }
}

impl MazeConfig {
    pub fn new(width: i32, height: i32, seed: u64) -> MazeConfig {
        MazeConfig {
            width,
            height,
            seed,
            ..MazeConfig::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: GenerationAlgorithm) -> MazeConfig {
        self.algorithm = algorithm;
        self
    }

    pub fn with_braid(mut self, braid: f64) -> MazeConfig {
        self.braid = braid;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let cells = i64::from(self.width) * i64::from(self.height);
        if self.width < 1 || self.height < 1 || cells >= i64::from(u32::MAX) {
            bail!(ErrorKind::InvalidDimensions(i64::from(self.width), i64::from(self.height)));
        }
        if !(0.0..=1.0).contains(&self.braid) {
            bail!(ErrorKind::InvalidBraidFactor(self.braid));
        }
        Ok(())
    }
}
