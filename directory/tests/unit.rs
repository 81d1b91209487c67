//! Unit tests for the pure directory components
//!
//! Query evaluation, aggregation, projection and the section reducer,
//! exercised through the public API.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use directory::core::aggregation::summarize;
use directory::core::projector::project;
use directory::core::query::apply;
use directory::core::store::{reduce, Action, StoreState};
use directory::{QuerySpec, SortKey, SortOrder, StateStore};
use shared::{Coordinates, Region, SchoolRecord, SchoolType, SectionKey};

mod common;
use common::{RecordBuilder, TestFixtures};

fn ids(records: &[SchoolRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

/// Average of [4.5, 4.2, 4.8] rounds to 4.5
#[test]
fn test_average_rating_scenario() {
    let stats = summarize(&TestFixtures::rated(&[4.5, 4.2, 4.8]));
    assert_eq!(stats.count, 3);
    assert_eq!(stats.average_rating, 4.5);
}

#[test]
fn test_empty_summary_is_all_zero() {
    let stats = summarize(&[]);
    assert_eq!(stats.count, 0);
    assert_eq!(stats.average_rating, 0.0);
    assert_eq!(stats.total_votes, 0);
    assert!(stats.count_by_type.is_empty());
}

#[test]
fn test_average_rating_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let len = rng.gen_range(1..20);
        let ratings: Vec<f64> = (0..len).map(|_| rng.gen_range(0.0..=5.0)).collect();
        let stats = summarize(&TestFixtures::rated(&ratings));
        assert!((0.0..=5.0).contains(&stats.average_rating), "{ratings:?}");
    }
}

/// Text search matches region, city and address, nothing else
#[test]
fn test_gaza_search_scenario() {
    let spec = QuerySpec::new().with_search_text(TestFixtures::GAZA);
    let results = apply(&TestFixtures::gaza_catalogue(), &spec);
    assert_eq!(ids(&results), vec!["gz-region", "gz-city", "wb-address"]);
}

#[test]
fn test_search_is_case_insensitive() {
    let records = vec![
        RecordBuilder::new("a").alternate_name("Gaza Central School").build(),
        RecordBuilder::new("b").alternate_name("Jenin Boys School").build(),
    ];
    let results = apply(&records, &QuerySpec::new().with_search_text("GAZA"));
    assert_eq!(ids(&results), vec!["a"]);
}

/// Secondary schools rated 4.0 and up, best first
#[test]
fn test_type_and_rating_filter_scenario() {
    let school_type: SchoolType = "ثانوية".parse().unwrap();
    let spec = QuerySpec::new()
        .with_type(school_type)
        .with_min_rating(4.0)
        .sorted_by(SortKey::Rating);

    let results = apply(&TestFixtures::typed_catalogue(), &spec);
    assert_eq!(ids(&results), vec!["s1", "s4", "s3"]);
    assert!(results.iter().all(|r| r.school_type == SchoolType::Secondary && r.rating >= 4.0));
}

#[test]
fn test_top_only_matches_four_star_floor() {
    let records = TestFixtures::typed_catalogue();
    let top_only = apply(&records, &QuerySpec::new().top_only());
    let floor = apply(&records, &QuerySpec::new().with_min_rating(4.0));
    assert_eq!(top_only, floor);
}

#[test]
fn test_nan_rating_floor_filters_everything_out() {
    let records = TestFixtures::typed_catalogue();
    let results = apply(&records, &QuerySpec::new().with_min_rating(f64::NAN));
    assert!(results.is_empty());
}

#[test]
fn test_region_and_directorate_filters() {
    let records = vec![
        RecordBuilder::new("g").gaza().build(),
        RecordBuilder::new("n").directorate("نابلس").build(),
        RecordBuilder::new("r").directorate("رام الله والبيرة").build(),
    ];

    let gaza = apply(&records, &QuerySpec::new().with_region(Region::Gaza));
    assert_eq!(ids(&gaza), vec!["g"]);

    let ramallah = apply(&records, &QuerySpec::new().with_directorate("رام الله والبيرة"));
    assert_eq!(ids(&ramallah), vec!["r"]);
}

#[test]
fn test_empty_spec_is_passthrough() {
    let spec = QuerySpec::new();
    assert!(spec.is_passthrough());
    for records in [TestFixtures::ties(), TestFixtures::typed_catalogue(), TestFixtures::gaza_catalogue()] {
        assert_eq!(apply(&records, &spec), records);
    }
}

#[test]
fn test_apply_is_idempotent() {
    let records = TestFixtures::ties();
    let specs = [
        QuerySpec::new().sorted_by(SortKey::Rating),
        QuerySpec::new().sorted_by(SortKey::Votes),
        QuerySpec::new().sorted_by(SortKey::Name),
        QuerySpec::new().sorted_by(SortKey::Name).with_order(SortOrder::Descending),
        QuerySpec::new().with_search_text("الأمل").sorted_by(SortKey::Votes),
        QuerySpec::new().top_only().sorted_by(SortKey::Rating),
    ];
    for spec in specs {
        let once = apply(&records, &spec);
        assert_eq!(apply(&once, &spec), once, "{spec:?}");
    }
}

#[test]
fn test_sort_is_stable_for_every_key() {
    let records = TestFixtures::ties();

    let by_rating = apply(&records, &QuerySpec::new().sorted_by(SortKey::Rating));
    assert_eq!(ids(&by_rating), vec!["t2", "t4", "t1", "t3", "t5", "t6"]);

    let by_votes = apply(&records, &QuerySpec::new().sorted_by(SortKey::Votes));
    assert_eq!(ids(&by_votes), vec!["t1", "t4", "t6", "t2", "t3", "t5"]);

    // إبن folds to ابن, which sorts ahead of الأمل
    let by_name = apply(&records, &QuerySpec::new().sorted_by(SortKey::Name));
    assert_eq!(ids(&by_name), vec!["t5", "t1", "t3", "t6", "t2", "t4"]);
}

#[test]
fn test_apply_leaves_source_untouched() {
    let records = TestFixtures::ties();
    let before = records.clone();
    let _ = apply(&records, &QuerySpec::new().sorted_by(SortKey::Votes).top_only());
    assert_eq!(records, before);
}

#[test]
fn test_projection_stays_on_panel() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let coord = Coordinates::new(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0));
        for region in Region::ALL {
            let position = project(coord, region);
            assert!((0.0..=100.0).contains(&position.top), "{coord:?} {region}");
            assert!((0.0..=100.0).contains(&position.left), "{coord:?} {region}");
        }
    }
}

/// Error then data on one section leaves every other slot untouched
#[test]
fn test_error_then_data_scenario() {
    let store: StateStore<Vec<u32>> = StateStore::new();
    for section in SectionKey::ALL {
        store.dispatch(Action::set_data(section, vec![0]));
    }
    let before = store.snapshot();

    store.dispatch(Action::set_error(SectionKey::Statistics, "x"));
    let after = store.dispatch(Action::set_data(SectionKey::Statistics, vec![1, 2]));

    let slot = after.get(SectionKey::Statistics).unwrap();
    assert_eq!(slot.data, Some(vec![1, 2]));
    assert!(!slot.loading);
    assert!(slot.error.is_none());
    assert_eq!(slot.retry_count, 0);

    for section in SectionKey::ALL.into_iter().filter(|s| *s != SectionKey::Statistics) {
        assert!(Arc::ptr_eq(
            before.get(section).unwrap(),
            after.get(section).unwrap()
        ));
    }
}

#[test]
fn test_reduce_is_deterministic() {
    let state: StoreState<String> = StoreState::default();
    let actions = [
        Action::set_loading(SectionKey::MapData, true),
        Action::set_error(SectionKey::MapData, "boom"),
        Action::set_data(SectionKey::BestOf, "best".to_string()),
    ];

    let run = || {
        actions
            .iter()
            .fold(state.clone(), |acc, action| reduce(&acc, action).unwrap_or(acc))
    };
    let first = run();
    let second = run();
    for section in SectionKey::ALL {
        assert_eq!(first.get(section), second.get(section));
    }
}
