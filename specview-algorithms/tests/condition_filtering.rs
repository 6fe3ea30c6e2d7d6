use specview_algorithms::{ConditionResult, DataService, FilterHighlight, IndeterminateReason};
use specview_core::{RangeWindow, ViewerConfig};

const SITE: &str = "Site A";
const SPECIMEN: &str = "Sample A1";

fn service() -> DataService {
    DataService::new(ViewerConfig::default()).unwrap()
}

#[test]
fn test_empty_condition_always_passes() {
    let mut service = service();
    for window in [RangeWindow::new(1, 100), RangeWindow::new(50, 100)] {
        for index in 0..5 {
            let result = service.check_condition(SITE, SPECIMEN, index, "  ", window);
            assert_eq!(result, ConditionResult::NoCondition);
            assert!(result.passes());
        }
    }
}

#[test]
fn test_ordering_conditions() {
    let mut service = service();
    let window = RangeWindow::default();
    for index in 0..5 {
        assert_eq!(
            service.check_condition(SITE, SPECIMEN, index, ">-1000", window),
            ConditionResult::Match
        );
        assert_eq!(
            service.check_condition(SITE, SPECIMEN, index, "<= 1000", window),
            ConditionResult::Match
        );
        assert_eq!(
            service.check_condition(SITE, SPECIMEN, index, "<-1000", window),
            ConditionResult::NoMatch
        );
        assert_eq!(
            service.check_condition(SITE, SPECIMEN, index, ">=1000", window),
            ConditionResult::NoMatch
        );
    }
}

#[test]
fn test_equality_matches_displayed_value() {
    let mut service = service();
    let window = RangeWindow::default();
    // Quadratic slot: mean well above 1, shown in fixed notation
    let summary = service.summary(SITE, SPECIMEN, window);
    let shown = summary.value(3).unwrap().as_str().to_string();

    assert_eq!(
        service.check_condition(SITE, SPECIMEN, 3, &shown, window),
        ConditionResult::Match
    );
    assert_eq!(
        service.check_condition(SITE, SPECIMEN, 3, &format!("!= {shown}"), window),
        ConditionResult::NoMatch
    );
    assert_eq!(
        service.check_condition(SITE, SPECIMEN, 3, "=123456", window),
        ConditionResult::NoMatch
    );
}

#[test]
fn test_fail_open_cases() {
    let mut service = service();
    let window = RangeWindow::default();
    assert_eq!(
        service.check_condition(SITE, SPECIMEN, 99, ">1", window),
        ConditionResult::Indeterminate(IndeterminateReason::ParameterOutOfRange)
    );
    assert_eq!(
        service.check_condition(SITE, SPECIMEN, 0, "abc", window),
        ConditionResult::Indeterminate(IndeterminateReason::UnparseableCondition)
    );
    assert_eq!(
        service.check_condition(SITE, SPECIMEN, 0, ">1", RangeWindow::new(50, 100)),
        ConditionResult::Indeterminate(IndeterminateReason::ValueUnavailable)
    );
    // Inverted windows select nothing
    assert_eq!(
        service.check_condition(SITE, SPECIMEN, 0, ">1", RangeWindow::new(80, 20)),
        ConditionResult::Indeterminate(IndeterminateReason::ValueUnavailable)
    );
}

#[test]
fn test_independent_conditions_per_parameter() {
    let mut service = service();
    let results = service.check_conditions(
        SITE,
        SPECIMEN,
        &["", ">-1000", "<-1000", "x", "<= 1000", ">0"],
        RangeWindow::default(),
    );
    assert_eq!(results.len(), 6);
    assert_eq!(results[0], ConditionResult::NoCondition);
    assert_eq!(results[1], ConditionResult::Match);
    assert_eq!(results[2], ConditionResult::NoMatch);
    assert_eq!(
        results[3],
        ConditionResult::Indeterminate(IndeterminateReason::UnparseableCondition)
    );
    assert_eq!(results[4], ConditionResult::Match);
    assert_eq!(
        results[5],
        ConditionResult::Indeterminate(IndeterminateReason::ParameterOutOfRange)
    );

    let highlights: Vec<FilterHighlight> = results.iter().map(|r| r.highlight()).collect();
    assert_eq!(highlights[0], FilterHighlight::Default);
    assert_eq!(highlights[1], FilterHighlight::Match);
    assert_eq!(highlights[2], FilterHighlight::NoMatch);
    assert_eq!(highlights[3], FilterHighlight::Match);
}
