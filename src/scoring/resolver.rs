//! Position and points resolution for a single event
//!
//! Finishers are ranked by elapsed time using standard competition ranking
//! ("1224"): tied times share a position and the next distinct time skips
//! past the whole tie group. Everyone else gets no position and no points.

use crate::scoring::points::PointsTable;
use crate::types::{ParticipantOutcome, RankedResult};

/// Resolves raw outcomes for one event into ranked, scored results
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    points: PointsTable,
}

impl Resolver {
    pub fn new(points: PointsTable) -> Self {
        Self { points }
    }

    pub fn points_table(&self) -> &PointsTable {
        &self.points
    }

    /// Rank and score `outcomes`.
    ///
    /// The result at index `i` always belongs to the outcome at index `i`.
    pub fn resolve(&self, outcomes: &[ParticipantOutcome]) -> Vec<RankedResult> {
        let mut ranked: Vec<RankedResult> = outcomes.iter().map(unranked).collect();

        let mut finishers: Vec<(usize, f64)> = outcomes
            .iter()
            .enumerate()
            .filter_map(|(index, outcome)| outcome.finishing_time().map(|time| (index, time)))
            .collect();
        finishers.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut previous: Option<(f64, u32)> = None;
        for (rank_index, (index, time)) in finishers.into_iter().enumerate() {
            let position = match previous {
                Some((previous_time, previous_position)) if previous_time == time => {
                    previous_position
                }
                _ => rank_index as u32 + 1,
            };
            previous = Some((time, position));

            let result = &mut ranked[index];
            result.position = Some(position);
            result.points = self.points.points_for(position);
        }

        ranked
    }
}

fn unranked(outcome: &ParticipantOutcome) -> RankedResult {
    RankedResult {
        participant_id: outcome.participant_id,
        elapsed_time: outcome.finishing_time(),
        status: outcome.status,
        position: None,
        points: 0,
    }
}

/// Resolve with the standard points table
pub fn resolve(outcomes: &[ParticipantOutcome]) -> Vec<RankedResult> {
    Resolver::default().resolve(outcomes)
}
