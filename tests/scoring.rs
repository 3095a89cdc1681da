use csv_quality::{
    Assessment, BinRule, Binning, Column, QualityMetrics, QualityWeights, ScoreError,
    ZeroWeightPolicy, compute_bin_count, compute_quality_score, detect_outliers,
    normalize_weights, score::DEFAULT_THRESHOLD,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn five_distinct_values_get_five_bins() {
    assert_eq!(
        compute_bin_count(&[1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 4.0, 5.0]),
        Binning::Bins {
            count: 5,
            rule: BinRule::PerValue
        }
    );
}

#[test]
fn missing_entries_are_dropped_before_binning() {
    let column = Column::from_fields([Some("1"), Some("NA"), None, Some("2"), Some("")]).unwrap();
    assert_eq!(column.count(), 2);
    assert_eq!(column.bin_count().count(), Some(2));
}

#[test]
fn single_data_point_skips_without_error() {
    assert!(compute_bin_count(&[42.0]).is_skip());
    let report = detect_outliers(&[42.0]).unwrap();
    assert_eq!(report.count(), 0);
    assert_eq!(report.lower_bound, 42.0);
}

#[test]
fn default_weights_with_clean_metrics_pass() {
    let weights = normalize_weights(&QualityWeights::new(45.0, 25.0, 30.0)).unwrap();
    assert!(close(weights.completeness, 45.0));
    assert!(close(weights.uniqueness, 25.0));
    assert!(close(weights.outliers, 30.0));

    let metrics = QualityMetrics::new(100.0, 100.0, 70.0).unwrap();
    let score = compute_quality_score(&weights, &metrics);
    assert!(close(score, 91.0));
    assert!(score >= DEFAULT_THRESHOLD);
}

#[test]
fn retail_metrics_fail_threshold() {
    let assessment = Assessment::evaluate(
        &QualityWeights::new(40.0, 30.0, 30.0),
        &QualityMetrics::new(75.5, 100.0, 30.0).unwrap(),
        DEFAULT_THRESHOLD,
        ZeroWeightPolicy::Reject,
    )
    .unwrap();
    assert!(close(assessment.score, 69.2));
    assert!(!assessment.passed);
}

#[test]
fn zero_weight_sum_is_a_typed_error() {
    let zero = QualityWeights::new(0.0, 0.0, 0.0);
    let metrics = QualityMetrics::new(50.0, 50.0, 50.0).unwrap();
    let err = Assessment::evaluate(&zero, &metrics, 75.0, ZeroWeightPolicy::Reject).unwrap_err();
    assert_eq!(err, ScoreError::ZeroWeightSum);

    let fallback = Assessment::evaluate(&zero, &metrics, 75.0, ZeroWeightPolicy::Equal).unwrap();
    assert!(close(fallback.score, 50.0));
    assert!(!fallback.passed);
}

#[test]
fn threshold_outside_percentage_range_is_rejected() {
    let err = Assessment::evaluate(
        &QualityWeights::default(),
        &QualityMetrics::new(80.0, 80.0, 80.0).unwrap(),
        120.0,
        ZeroWeightPolicy::Reject,
    )
    .unwrap_err();
    assert_eq!(err, ScoreError::InvalidThreshold(120.0));
}
