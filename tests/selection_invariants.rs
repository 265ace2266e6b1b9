//! Selection Tests
//!
//! Filter and view behavior over a generated dataset of 100 entities:
//! - Tightening any threshold never adds rows
//! - The selection is an order-preserving subset of the dataset
//! - Views sort stably and never exceed their limit
//! - Summary totals equal the sum of the selected rows

mod common;

use common::{Criterion, Fixture, Lcg};
use critmetrics::merge::Dataset;
use critmetrics::selection::{FilterConfig, Metric, Slice};
use critmetrics::Dashboard;

// =============================================================================
// Helper Functions
// =============================================================================

fn generated() -> (Fixture, Dataset) {
    let fx = Fixture::new();
    let mut rng = Lcg::new(2024);
    for id in 1..=100 {
        fx.entity(id, &format!("School {:03}", id));
        fx.criteria(id, Criterion::plain(), rng.next_below(20) as usize);
        fx.criteria(id, Criterion::formula().with_parallel(), rng.next_below(4) as usize);
        fx.criteria(id, Criterion::group().with_semester(), rng.next_below(3) as usize);
        for _ in 0..rng.next_below(3) {
            fx.class(id, rng.next_below(30) as usize);
        }
    }
    let dataset = Dashboard::new(fx.source()).load().unwrap();
    (fx, dataset)
}

// =============================================================================
// Filter Tests
// =============================================================================

#[test]
fn test_raising_thresholds_never_adds_rows() {
    let (_fx, dataset) = generated();

    let mut previous = usize::MAX;
    for min in 0..=60 {
        let kept = FilterConfig::default()
            .with_min_enrollments(min)
            .apply(dataset.rows())
            .len();
        assert!(kept <= previous, "min_enrollments={} added rows", min);
        previous = kept;
    }

    let mut previous = usize::MAX;
    for min in 1..=30 {
        let kept = FilterConfig::default()
            .with_min_criteria(min)
            .apply(dataset.rows())
            .len();
        assert!(kept <= previous, "min_criteria={} added rows", min);
        previous = kept;
    }
}

#[test]
fn test_selection_is_ordered_subset() {
    let (_fx, dataset) = generated();
    let filter = FilterConfig::default()
        .with_min_enrollments(10)
        .with_min_criteria(5);
    let selection = filter.apply(dataset.rows());

    let mut cursor = dataset.rows().iter();
    for row in selection.rows() {
        assert!(row.total_enrollments >= 10);
        assert!(row.total_criteria >= 5);
        assert!(cursor.any(|r| r == *row), "row out of dataset order");
    }
}

#[test]
fn test_entity_set_restricts_selection() {
    let (_fx, dataset) = generated();
    let names: Vec<String> = dataset
        .rows()
        .iter()
        .take(3)
        .map(|r| r.name().to_string())
        .collect();

    let selection = FilterConfig::default()
        .with_entities(names.clone())
        .apply(dataset.rows());
    assert_eq!(selection.len(), 3);
    assert!(selection.rows().iter().all(|r| names.contains(&r.entity.name)));
}

#[test]
fn test_thresholds_above_maximum_select_nothing() {
    let (_fx, dataset) = generated();
    let selection = FilterConfig::default()
        .with_min_enrollments(dataset.max_enrollments() + 1)
        .apply(dataset.rows());
    assert!(selection.is_empty());
    assert_eq!(selection.summary().entities, 0);
    assert!(selection.summary().distribution().is_empty());
}

// =============================================================================
// View Tests
// =============================================================================

#[test]
fn test_top_views_sorted_and_bounded() {
    let (_fx, dataset) = generated();
    let selection = FilterConfig::default().apply(dataset.rows());

    for metric in Metric::ALL {
        let top = selection.top(metric, 30);
        assert!(top.len() <= 30);
        for pair in top.windows(2) {
            assert!(metric.value(pair[0]) >= metric.value(pair[1]));
        }
    }
}

#[test]
fn test_sort_ties_keep_dataset_order() {
    let (_fx, dataset) = generated();
    let selection = FilterConfig::default().apply(dataset.rows());
    let position = |id: i64| dataset.rows().iter().position(|r| r.entity.id == id);

    let sorted = selection.sorted(Metric::TotalClasses);
    for pair in sorted.windows(2) {
        if pair[0].total_classes == pair[1].total_classes {
            assert!(position(pair[0].entity.id) < position(pair[1].entity.id));
        }
    }
}

#[test]
fn test_category_view_only_positive() {
    let (_fx, dataset) = generated();
    let selection = FilterConfig::default().apply(dataset.rows());

    for metric in Metric::CATEGORIES {
        for entry in selection.category(metric) {
            assert!(entry.value > 0.0);
            let share = entry.percent_of_criteria.unwrap();
            assert!(share <= 100.0);
        }
    }
}

#[test]
fn test_summary_matches_selected_rows() {
    let (_fx, dataset) = generated();
    let selection = FilterConfig::default()
        .with_min_enrollments(5)
        .apply(dataset.rows());
    let summary = selection.summary();

    let total: u64 = selection.rows().iter().map(|r| r.total_criteria).sum();
    let formula: u64 = selection.rows().iter().map(|r| r.custom_formula).sum();
    assert_eq!(summary.entities, selection.len());
    assert_eq!(summary.total_criteria, total);
    assert_eq!(summary.custom_formula, formula);

    let distribution = summary.distribution();
    assert!(distribution.iter().all(|d| d.quantity > 0));
    assert!(distribution.iter().any(|d| d.slice == Slice::OtherCriteria));
}

#[test]
fn test_profile_of_selected_entity() {
    let (_fx, dataset) = generated();
    let selection = FilterConfig::default().apply(dataset.rows());
    let first = selection.rows()[0];

    let profile = selection.profile(first.name()).unwrap();
    assert_eq!(profile.total_criteria, first.total_criteria);
    assert_eq!(profile.categories.len(), 6);
    assert_eq!(profile.categories[0], (Metric::CustomFormula, first.custom_formula));
    assert!(selection.profile("Nowhere").is_none());
}
