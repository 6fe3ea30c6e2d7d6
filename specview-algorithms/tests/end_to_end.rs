use specview_algorithms::{
    DataService, OverallStatistics, SelectionEntry, SlotAverage, SpecimenSource, SummaryValue,
};
use specview_core::series::{PlotLabels, PlotSeries};
use specview_core::{format_display, Catalog, RangeWindow, Site, ViewerConfig};

fn service() -> DataService {
    DataService::new(ViewerConfig::default()).unwrap()
}

/// Every slot is a flat line at `slot + 1` over x in `[0, 10]`.
struct FlatSource;

impl SpecimenSource for FlatSource {
    fn series(&self, _site: &str, _specimen: &str, slot: usize) -> PlotSeries {
        let level = (slot + 1) as f64;
        PlotSeries::Single {
            x: (0..=10).map(f64::from).collect(),
            y: vec![level; 11],
            labels: PlotLabels {
                title: format!("Plot {}", slot + 1),
                xlabel: "X Values".to_string(),
                ylabel: "Y Values".to_string(),
            },
        }
    }
}

#[test]
fn test_summary_for_default_window() {
    let mut service = service();
    assert_eq!(
        service.list_specimens("Site A"),
        ["Sample A1", "Sample A2", "Sample A3"]
    );

    let summary = service.summary("Site A", "Sample A1", RangeWindow::new(1, 100));
    assert_eq!(summary.len(), 5);
    for (entry, label) in summary.entries().iter().zip(service.labels()) {
        assert_eq!(&entry.label, label);
        assert!(entry.value.is_available(), "{} is N/A", entry.label);
        let value = entry.value.numeric().unwrap();
        assert_eq!(entry.value.as_str(), format_display(value));
    }
}

#[test]
fn test_window_outside_data_is_unavailable() {
    let mut service = service();
    let averages = service.range_averages("Site B", "Sample B1", RangeWindow::new(50, 100));
    assert!(averages.slots.iter().all(|s| !s.has_data()));
    assert_eq!(averages.overall, OverallStatistics::NoPointsInRange);

    let summary = service.summary("Site B", "Sample B1", RangeWindow::new(50, 100));
    assert!(summary
        .entries()
        .iter()
        .all(|e| e.value == SummaryValue::NotAvailable));
}

#[test]
fn test_extra_parameters_are_unavailable() {
    let config = ViewerConfig::new().with_num_plots(3).with_num_params(5);
    let mut service = DataService::new(config).unwrap();
    let summary = service.summary("Site C", "Sample C3", RangeWindow::default());
    assert!(summary.value(2).is_some_and(SummaryValue::is_available));
    assert_eq!(summary.value(3), Some(&SummaryValue::NotAvailable));
    assert_eq!(summary.value(4), Some(&SummaryValue::NotAvailable));
}

#[test]
fn test_empty_slots_excluded_from_pool() {
    let catalog = Catalog::new(vec![Site::new("S", ["a"])]).unwrap();
    let config = ViewerConfig::new().with_num_plots(2);
    let mut service = DataService::with_source(config, catalog, FlatSource).unwrap();

    let averages = service.range_averages("S", "a", RangeWindow::new(11, 20));
    assert!(matches!(averages.slots[0], SlotAverage::NoPointsInRange { .. }));
    assert_eq!(averages.overall, OverallStatistics::NoPointsInRange);

    let averages = service.range_averages("S", "a", RangeWindow::new(5, 10));
    let OverallStatistics::Pooled(pooled) = averages.overall else {
        panic!("window overlaps the data");
    };
    assert_eq!(pooled.valid_slots, 2);
    assert_eq!(pooled.stats.count, 12);
    assert!((pooled.stats.mean - 1.5).abs() < f64::EPSILON);
}

#[test]
fn test_site_stats_over_selection() {
    let mut service = service();
    let selection = vec![
        SelectionEntry::from("Site A → Sample A1"),
        SelectionEntry::pair("Site A", "Sample A2"),
        SelectionEntry::from("Site B → Sample B1"),
    ];
    let stats = service
        .site_stats("Site A", &selection, RangeWindow::new(1, 100))
        .unwrap();

    assert_eq!(stats.specimen_count(), 2);
    assert_eq!(stats.parameters.len(), 5);
    for param in &stats.parameters {
        assert!(param.std >= 0.0);
        assert_eq!(param.count, 2);
        assert!(param.available <= 2);
        assert!((param.upper_1sigma - (param.mean + param.std)).abs() < 1e-12);
        assert!((param.lower_1sigma - (param.mean - param.std)).abs() < 1e-12);
    }
}

#[test]
fn test_global_stats_fall_back_to_catalog() {
    let mut service = service();
    let global = service.global_stats(&[], RangeWindow::default());
    assert_eq!(
        global.site_names().collect::<Vec<_>>(),
        ["Site A", "Site B", "Site C", "Site D"]
    );
    assert_eq!(global.parameters.len(), 5);
    assert!(global.parameters.iter().all(|p| p.count == 4 && p.std >= 0.0));

    let selection = vec![
        SelectionEntry::from("Site D → Sample D1"),
        SelectionEntry::from("Site A → Sample A3"),
    ];
    let global = service.global_stats(&selection, RangeWindow::default());
    assert_eq!(global.site_names().collect::<Vec<_>>(), ["Site D", "Site A"]);
    assert_eq!(global.sites[0].specimen_count(), 1);
}

#[test]
fn test_cache_lifecycle() {
    let mut service = service();
    let info = service.cache_info();
    assert_eq!(info.total_specimens, 11);
    assert_eq!(info.cached_specimens, 11);
    assert!(info.complete);

    let before = service.summary("Site D", "Sample D2", RangeWindow::default());
    service.full_dataset("Site E", "Sample E1");
    let info = service.cache_info();
    assert_eq!(info.cached_specimens, 12);
    assert!(!info.complete);

    service.clear_cache();
    let info = service.cache_info();
    assert_eq!(info.cached_specimens, 11);
    assert!(info.complete);
    assert_eq!(
        service.summary("Site D", "Sample D2", RangeWindow::default()),
        before
    );
}

#[test]
fn test_full_dataset_has_every_slot() {
    let mut service = service();
    let dataset = service.full_dataset("Site C", "Sample C4");
    assert_eq!(dataset.len(), 8);
    assert!(dataset.iter().all(|series| !series.is_empty()));
}
