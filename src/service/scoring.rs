//! Scoring service
//!
//! Coordinates the result store with the resolver and the standings
//! aggregator. Submissions resolve then replace an event's rows in one go;
//! every read recomputes its view from the stored rows.

use crate::config::AppConfig;
use crate::error::{Result, ScoringError};
use crate::metrics::MetricsCollector;
use crate::scoring::{PointsTable, Resolver};
use crate::standings::{
    EventSummary, ParticipantResult, ResultsFilter, Standings, StandingsAggregator, TrendPoint,
};
use crate::store::{ResultStore, RetryPolicy};
use crate::types::{EventId, ParticipantOutcome, RankedResult, ResultStatus, StoredResult};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct ScoringService<S: ResultStore> {
    store: Arc<S>,
    resolver: Resolver,
    aggregator: StandingsAggregator,
    retry: RetryPolicy,
    metrics: Option<Arc<MetricsCollector>>,
}

impl<S: ResultStore> ScoringService<S> {
    /// Service with the standard points table and default retry policy
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            resolver: Resolver::default(),
            aggregator: StandingsAggregator::default(),
            retry: RetryPolicy::default(),
            metrics: None,
        }
    }

    pub fn from_config(store: Arc<S>, config: &AppConfig) -> Self {
        Self::new(store)
            .with_points_table(config.scoring.points_table.clone())
            .with_aggregator(StandingsAggregator::new(
                config.scoring.top_performers_limit,
            ))
            .with_retry_policy(config.retry_policy())
    }

    pub fn with_points_table(mut self, points: PointsTable) -> Self {
        self.resolver = Resolver::new(points);
        self
    }

    pub fn with_aggregator(mut self, aggregator: StandingsAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Resolve a full outcome list for one event and replace its stored results.
    ///
    /// Returns the ranked results in the same order as `outcomes`.
    pub async fn submit_event_results(
        &self,
        event_id: EventId,
        outcomes: Vec<ParticipantOutcome>,
    ) -> Result<Vec<RankedResult>> {
        let result = self.try_submit(event_id, &outcomes).await;
        if let Some(metrics) = &self.metrics {
            metrics.record_submission(result.is_ok());
        }

        match &result {
            Ok(ranked) => info!(
                "Stored {} results for event {} ({} finishers)",
                ranked.len(),
                event_id,
                ranked.iter().filter(|r| r.is_finisher()).count()
            ),
            Err(e) => error!("Results submission for event {} failed: {}", event_id, e),
        }

        result
    }

    async fn try_submit(
        &self,
        event_id: EventId,
        outcomes: &[ParticipantOutcome],
    ) -> Result<Vec<RankedResult>> {
        let events = self.read("events", || self.store.events()).await?;
        if !events.iter().any(|e| e.id == event_id) {
            return Err(ScoringError::EventNotFound { event_id }.into());
        }

        let participants = self
            .read("participants", || self.store.participants())
            .await?;
        let known: HashSet<_> = participants.iter().map(|p| p.id).collect();
        if let Some(unknown) = outcomes.iter().find(|o| !known.contains(&o.participant_id)) {
            return Err(ScoringError::ParticipantNotFound {
                participant_id: unknown.participant_id,
            }
            .into());
        }

        let ranked = self.resolve(outcomes);

        if let Err(e) = self
            .store
            .replace_event_results(event_id, ranked.clone())
            .await
        {
            if let Some(metrics) = &self.metrics {
                metrics.record_store_error("replace_event_results");
            }
            return Err(e);
        }

        Ok(ranked)
    }

    /// Run the resolver, recording how long it took
    pub fn resolve(&self, outcomes: &[ParticipantOutcome]) -> Vec<RankedResult> {
        let Some(metrics) = &self.metrics else {
            return self.resolver.resolve(outcomes);
        };

        let timer = metrics.start_timer();
        let ranked = self.resolver.resolve(outcomes);
        let duration = timer.stop();

        let statuses: Vec<ResultStatus> = ranked.iter().map(|r| r.status).collect();
        metrics.record_resolution(&statuses, tied_finishers(&ranked), duration);
        debug!(
            "Resolved {} outcomes in {:.3}ms",
            ranked.len(),
            duration.as_secs_f64() * 1000.0
        );
        ranked
    }

    /// Stored results for one event, best position first.
    ///
    /// Unplaced rows follow placed ones; within each group faster times come
    /// first and missing times last.
    pub async fn event_results(&self, event_id: EventId) -> Result<Vec<StoredResult>> {
        let mut rows = self
            .read("event_results", || self.store.event_results(event_id))
            .await?;
        rows.sort_by(|a, b| {
            nulls_last(a.result.position, b.result.position, |x, y| x.cmp(y)).then_with(|| {
                nulls_last(a.result.elapsed_time, b.result.elapsed_time, |x, y| {
                    x.total_cmp(y)
                })
            })
        });
        Ok(rows)
    }

    /// House totals, house performance, win counts and the leaderboard
    pub async fn standings(&self) -> Result<Standings> {
        let results = self.read("all_results", || self.store.all_results()).await?;
        let houses = self.read("houses", || self.store.houses()).await?;
        let participants = self
            .read("participants", || self.store.participants())
            .await?;

        let timer = self.metrics.as_ref().map(|m| m.start_timer());
        let standings = self.aggregator.aggregate(&results, &houses, &participants);
        if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
            metrics.record_aggregation("standings", timer.stop());
        }

        debug!(
            "Computed standings over {} results for {} houses",
            results.len(),
            houses.len()
        );
        Ok(standings)
    }

    pub async fn event_summaries(&self) -> Result<Vec<EventSummary>> {
        let results = self.read("all_results", || self.store.all_results()).await?;
        let events = self.read("events", || self.store.events()).await?;

        let timer = self.metrics.as_ref().map(|m| m.start_timer());
        let summaries = self.aggregator.event_summaries(&results, &events);
        if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
            metrics.record_aggregation("event_summaries", timer.stop());
        }
        Ok(summaries)
    }

    pub async fn performance_trends(&self) -> Result<Vec<TrendPoint>> {
        let results = self.read("all_results", || self.store.all_results()).await?;
        let houses = self.read("houses", || self.store.houses()).await?;
        let participants = self
            .read("participants", || self.store.participants())
            .await?;
        let events = self.read("events", || self.store.events()).await?;

        let timer = self.metrics.as_ref().map(|m| m.start_timer());
        let trends = self
            .aggregator
            .performance_trends(&results, &houses, &participants, &events);
        if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
            metrics.record_aggregation("performance_trends", timer.stop());
        }
        Ok(trends)
    }

    /// Named results across every event, in programme then finishing order
    pub async fn participant_results(
        &self,
        filter: &ResultsFilter,
    ) -> Result<Vec<ParticipantResult>> {
        let results = self.read("all_results", || self.store.all_results()).await?;
        let houses = self.read("houses", || self.store.houses()).await?;
        let participants = self
            .read("participants", || self.store.participants())
            .await?;
        let events = self.read("events", || self.store.events()).await?;

        let timer = self.metrics.as_ref().map(|m| m.start_timer());
        let rows = self
            .aggregator
            .participant_results(&results, &houses, &participants, &events, filter);
        if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
            metrics.record_aggregation("participant_results", timer.stop());
        }

        debug!(
            "Listed {} of {} stored results with {:?}",
            rows.len(),
            results.len(),
            filter
        );
        Ok(rows)
    }

    /// Store read with retries; the final error is returned unchanged
    async fn read<T, F, Fut>(&self, operation: &str, read: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let result = self
            .retry
            .run(operation, read, |_| {
                if let Some(metrics) = &self.metrics {
                    metrics.record_store_retry(operation);
                }
            })
            .await;

        if result.is_err() {
            if let Some(metrics) = &self.metrics {
                metrics.record_store_error(operation);
            }
        }
        result
    }
}

fn nulls_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Finishers whose position is shared with at least one other finisher
fn tied_finishers(ranked: &[RankedResult]) -> usize {
    let mut per_position: HashMap<u32, usize> = HashMap::new();
    for position in ranked.iter().filter_map(|r| r.position) {
        *per_position.entry(position).or_default() += 1;
    }
    per_position.values().filter(|n| **n > 1).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockResultStore;
    use crate::types::{Event, Participant};

    fn event(id: u64) -> Event {
        Event {
            id,
            name: format!("Event {}", id),
            category: String::new(),
            distance: String::new(),
            gender: None,
            age_group: String::new(),
            max_participants_per_house: None,
            is_active: true,
            event_order: id as u32,
        }
    }

    fn participant(id: u64) -> Participant {
        Participant {
            id,
            name: format!("Swimmer {}", id),
            house_id: 1,
            age: None,
            gender: None,
        }
    }

    #[tokio::test]
    async fn test_unknown_event_never_touches_results() {
        let mut store = MockResultStore::new();
        store.expect_events().returning(|| Ok(vec![event(1)]));
        store.expect_replace_event_results().never();

        let service = ScoringService::new(Arc::new(store)).with_retry_policy(RetryPolicy::none());
        let err = service
            .submit_event_results(2, vec![ParticipantOutcome::completed(1, 30.0)])
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ScoringError>(),
            Some(ScoringError::EventNotFound { event_id: 2 })
        ));
    }

    #[tokio::test]
    async fn test_unknown_participant_rejected() {
        let mut store = MockResultStore::new();
        store.expect_events().returning(|| Ok(vec![event(1)]));
        store
            .expect_participants()
            .returning(|| Ok(vec![participant(1)]));
        store.expect_replace_event_results().never();

        let service = ScoringService::new(Arc::new(store)).with_retry_policy(RetryPolicy::none());
        let err = service
            .submit_event_results(
                1,
                vec![
                    ParticipantOutcome::completed(1, 30.0),
                    ParticipantOutcome::completed(9, 31.0),
                ],
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ScoringError>(),
            Some(ScoringError::ParticipantNotFound { participant_id: 9 })
        ));
    }

    #[tokio::test]
    async fn test_submission_replaces_with_resolved_rows() {
        let mut store = MockResultStore::new();
        store.expect_events().returning(|| Ok(vec![event(3)]));
        store
            .expect_participants()
            .returning(|| Ok(vec![participant(1), participant(2)]));
        store
            .expect_replace_event_results()
            .withf(|event_id, results| {
                *event_id == 3
                    && results.len() == 2
                    && results[0].position == Some(2)
                    && results[1].position == Some(1)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let metrics = Arc::new(MetricsCollector::new().unwrap());
        let service = ScoringService::new(Arc::new(store))
            .with_retry_policy(RetryPolicy::none())
            .with_metrics(metrics.clone());

        let ranked = service
            .submit_event_results(
                3,
                vec![
                    ParticipantOutcome::completed(1, 31.0),
                    ParticipantOutcome::completed(2, 30.0),
                ],
            )
            .await
            .unwrap();

        assert_eq!(ranked[0].points, 3);
        assert_eq!(ranked[1].points, 4);
        assert_eq!(
            metrics
                .scoring()
                .submissions_total
                .with_label_values(&["success"])
                .get(),
            1
        );
    }

    #[tokio::test]
    async fn test_store_write_error_propagates() {
        let mut store = MockResultStore::new();
        store.expect_events().returning(|| Ok(vec![event(1)]));
        store
            .expect_participants()
            .returning(|| Ok(vec![participant(1)]));
        store
            .expect_replace_event_results()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("connection refused")));

        let service = ScoringService::new(Arc::new(store));
        let err = service
            .submit_event_results(1, vec![ParticipantOutcome::completed(1, 30.0)])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn test_read_errors_propagate_after_retries() {
        let mut store = MockResultStore::new();
        store
            .expect_all_results()
            .times(2)
            .returning(|| Err(anyhow::anyhow!("timeout")));

        let service = ScoringService::new(Arc::new(store)).with_retry_policy(RetryPolicy::new(
            2,
            std::time::Duration::from_millis(1),
        ));

        let err = service.standings().await.unwrap_err();
        assert_eq!(err.to_string(), "timeout");
    }

    #[test]
    fn test_tied_finishers_counted() {
        let ranked = crate::scoring::resolve(&[
            ParticipantOutcome::completed(1, 30.0),
            ParticipantOutcome::completed(2, 30.0),
            ParticipantOutcome::completed(3, 31.0),
            ParticipantOutcome::not_finished(4, ResultStatus::DidNotStart),
        ]);
        assert_eq!(tied_finishers(&ranked), 2);
    }

    #[tokio::test]
    async fn test_participant_results_filtered_by_house() {
        use crate::types::House;

        let mut store = MockResultStore::new();
        store.expect_all_results().returning(|| {
            let ranked = crate::scoring::resolve(&[
                ParticipantOutcome::completed(1, 31.0),
                ParticipantOutcome::completed(2, 30.0),
            ]);
            Ok(ranked
                .into_iter()
                .map(|result| StoredResult {
                    event_id: 1,
                    result,
                    recorded_at: crate::utils::current_timestamp(),
                })
                .collect())
        });
        store.expect_houses().returning(|| {
            Ok(vec![House {
                id: 1,
                name: "Red".to_string(),
                color: "#d32f2f".to_string(),
            }])
        });
        store.expect_participants().returning(|| {
            let mut other = participant(2);
            other.house_id = 2;
            Ok(vec![participant(1), other])
        });
        store.expect_events().returning(|| Ok(vec![event(1)]));

        let service = ScoringService::new(Arc::new(store)).with_retry_policy(RetryPolicy::none());

        // swimmer 2 belongs to a house that isn't on file
        let all = service
            .participant_results(&ResultsFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 1);

        let red = service
            .participant_results(&ResultsFilter::for_house(1))
            .await
            .unwrap();
        assert_eq!(red.len(), 1);
        assert_eq!(red[0].participant_name, "Swimmer 1");
        assert_eq!(red[0].house_color, "#d32f2f");
        assert_eq!(red[0].position, Some(2));
        assert_eq!(red[0].event_name, "Event 1");
    }
}
