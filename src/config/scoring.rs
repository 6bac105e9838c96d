//! Scoring and standings configuration

use crate::scoring::PointsTable;
use crate::standings::DEFAULT_TOP_PERFORMERS_LIMIT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Points for 1st, 2nd, ...; later positions score nothing
    pub points_table: PointsTable,
    /// Entries on the top performers leaderboard
    pub top_performers_limit: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            points_table: PointsTable::standard(),
            top_performers_limit: DEFAULT_TOP_PERFORMERS_LIMIT,
        }
    }
}

/// Parse a comma separated points table such as `4,3,2,1`
pub fn parse_points_table(value: &str) -> crate::error::Result<PointsTable> {
    let points = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| anyhow::anyhow!("Invalid points value '{}' in points table", s))
        })
        .collect::<crate::error::Result<Vec<u32>>>()?;
    PointsTable::new(points)
}
