//! Performance benchmarks for result resolution and standings

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gala_scoreboard::scoring::resolve;
use gala_scoreboard::standings::StandingsAggregator;
use gala_scoreboard::store::{InMemoryResultStore, MeetSnapshot};
use gala_scoreboard::types::{
    Event, House, Participant, ParticipantOutcome, ResultStatus, StoredResult,
};
use gala_scoreboard::ScoringService;
use std::sync::Arc;

const HOUSES: u64 = 4;
const SWIMMERS: u64 = 200;
const EVENTS: u64 = 40;

fn create_outcomes(count: u64) -> Vec<ParticipantOutcome> {
    (0..count)
        .map(|i| match i % 10 {
            // roughly one in ten doesn't finish
            9 => ParticipantOutcome::not_finished(i, ResultStatus::Disqualified),
            // every few swimmers share a time to the hundredth
            n => ParticipantOutcome::completed(i, 30.0 + ((i / 3) * 7 % 400) as f64 / 100.0 + n as f64),
        })
        .collect()
}

fn create_meet() -> MeetSnapshot {
    let houses = (1..=HOUSES)
        .map(|id| House {
            id,
            name: format!("House {}", id),
            color: "#000000".to_string(),
        })
        .collect();

    let participants = (1..=SWIMMERS)
        .map(|id| Participant {
            id,
            name: format!("Swimmer {}", id),
            house_id: id % HOUSES + 1,
            age: Some(10 + (id % 8) as u32),
            gender: None,
        })
        .collect();

    let events = (1..=EVENTS)
        .map(|id| Event {
            id,
            name: format!("Event {}", id),
            category: "Freestyle".to_string(),
            distance: "50m".to_string(),
            gender: None,
            age_group: "Open".to_string(),
            max_participants_per_house: Some(2),
            is_active: true,
            event_order: id as u32,
        })
        .collect();

    // eight swimmers per event, two from each house
    let results = (1..=EVENTS)
        .flat_map(|event_id| {
            let outcomes: Vec<ParticipantOutcome> = (0..8)
                .map(|lane| {
                    let swimmer = (event_id * 8 + lane) % SWIMMERS + 1;
                    ParticipantOutcome::completed(swimmer, 28.0 + ((event_id + lane) % 5) as f64)
                })
                .collect();
            resolve(&outcomes)
                .into_iter()
                .map(move |result| StoredResult {
                    event_id,
                    result,
                    recorded_at: gala_scoreboard::utils::current_timestamp(),
                })
        })
        .collect();

    MeetSnapshot {
        houses,
        participants,
        events,
        results,
    }
}

fn bench_resolution(c: &mut Criterion) {
    let heat = create_outcomes(8);
    c.bench_function("resolve_single_heat", |b| {
        b.iter(|| black_box(resolve(black_box(&heat))))
    });

    let field = create_outcomes(1000);
    c.bench_function("resolve_1000_outcomes", |b| {
        b.iter(|| black_box(resolve(black_box(&field))))
    });
}

fn bench_standings(c: &mut Criterion) {
    let meet = create_meet();
    let aggregator = StandingsAggregator::default();

    c.bench_function("standings_aggregate", |b| {
        b.iter(|| {
            black_box(aggregator.aggregate(&meet.results, &meet.houses, &meet.participants))
        })
    });

    c.bench_function("event_summaries", |b| {
        b.iter(|| black_box(aggregator.event_summaries(&meet.results, &meet.events)))
    });
}

fn bench_submission(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = ScoringService::new(Arc::new(InMemoryResultStore::from_snapshot(create_meet())));
    let outcomes: Vec<ParticipantOutcome> = (1..=8)
        .map(|id| ParticipantOutcome::completed(id, 30.0 + id as f64 / 10.0))
        .collect();

    c.bench_function("submit_and_read_standings", |b| {
        b.iter(|| {
            rt.block_on(async {
                service
                    .submit_event_results(1, outcomes.clone())
                    .await
                    .unwrap();
                black_box(service.standings().await.unwrap())
            })
        })
    });
}

criterion_group!(benches, bench_resolution, bench_standings, bench_submission);
criterion_main!(benches);
