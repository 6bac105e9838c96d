//! Position to points lookup

use crate::error::ScoringError;
use serde::{Deserialize, Serialize};

/// Points awarded per finishing position; index 0 is first place.
///
/// Positions past the end of the table score zero. Tied finishers each take
/// the full points of their shared position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsTable(Vec<u32>);

impl PointsTable {
    /// 1st=4, 2nd=3, 3rd=2, 4th=1, 5th and below=0
    pub fn standard() -> Self {
        Self(vec![4, 3, 2, 1])
    }

    pub fn new(points: Vec<u32>) -> crate::error::Result<Self> {
        let table = Self(points);
        table.validate()?;
        Ok(table)
    }

    /// Tables must never reward a worse position more than a better one
    pub fn validate(&self) -> crate::error::Result<()> {
        if let Some(w) = self.0.windows(2).find(|w| w[1] > w[0]) {
            return Err(ScoringError::ConfigurationError {
                message: format!(
                    "Points table must be non-increasing, found {} followed by {}",
                    w[0], w[1]
                ),
            }
            .into());
        }
        Ok(())
    }

    pub fn points_for(&self, position: u32) -> u32 {
        if position == 0 {
            return 0;
        }
        self.0
            .get(position as usize - 1)
            .copied()
            .unwrap_or(0)
    }

    /// Number of positions that score
    pub fn scoring_places(&self) -> usize {
        self.0.iter().filter(|p| **p > 0).count()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Default for PointsTable {
    fn default() -> Self {
        Self::standard()
    }
}
