//! Integration tests for the metric catalog.

use renpho_api::metrics::{find_metric, metrics_in_group, MetricGroup, METRIC_CATALOG};
use renpho_api::{MeasurementSnapshot, WeightUnit};
use serde_json::json;

#[test]
fn test_every_weight_metric_reads_from_a_measurement() {
    let snapshot: MeasurementSnapshot = serde_json::from_value(json!({
        "weight": 70.5,
        "bmi": 22.1,
        "bodyfat": 18.2,
        "resistance20_left_arm": 410
    }))
    .unwrap();

    for id in ["weight", "bmi", "bodyfat", "resistance20_left_arm"] {
        let metric = find_metric(id).unwrap();
        assert_eq!(metric.group, MetricGroup::Weight);
        assert!(snapshot.field(metric.id).is_some(), "{id} should be readable");
    }
}

#[test]
fn test_catalog_covers_every_group_but_growth() {
    assert!(metrics_in_group(MetricGroup::Weight).count() > 10);
    assert!(metrics_in_group(MetricGroup::Girth).count() > 5);
    assert!(metrics_in_group(MetricGroup::GirthGoals).count() > 5);
    assert_eq!(metrics_in_group(MetricGroup::GrowthRecord).count(), 0);
}

#[test]
fn test_unique_ids_are_prefixed_slugs() {
    for metric in METRIC_CATALOG {
        let unique_id = metric.unique_id();
        assert!(unique_id.starts_with("renpho_"));
        assert!(unique_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }
}

#[test]
fn test_only_mass_metrics_follow_unit_preference() {
    for metric in METRIC_CATALOG {
        let unit = metric.display_unit(WeightUnit::Pounds);
        if metric.is_mass() {
            assert_eq!(unit, "lbs");
        } else {
            assert_eq!(unit, metric.unit);
        }
    }
}

#[test]
fn test_unknown_metric_is_absent() {
    assert!(find_metric("steps").is_none());
}
