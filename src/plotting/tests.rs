#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::analysis::{CombinedCommitActivity, CommitActivity};
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup_request(dir: &TempDir) -> ChartRequest {
        ChartRequest {
            output_dir: dir.path().to_path_buf(),
            output_prefix: "foo_and_bar".to_string(),
            format: OutputFormat::Png,
            mode: AnalysisMode::Commits,
            group_by: GroupBy::Flat,
            normalize: false,
        }
    }

    fn setup_combined() -> CombinedCommitActivity {
        // 2024-03-04 10:00 UTC and 2024-01-12 15:00 UTC
        let monday = DateTime::<Utc>::from_timestamp(1_709_546_400, 0).unwrap();
        let friday = DateTime::<Utc>::from_timestamp(1_705_071_600, 0).unwrap();

        let mut foo = CommitActivity::new();
        foo.record_event("Alice", &monday, 3);
        foo.record_event("Bob", &friday, 1);
        let mut bar = CommitActivity::new();
        bar.record_event("Alice", &friday, 2);

        let mut combined = CombinedCommitActivity::new();
        combined.add("foo", foo);
        combined.add("bar", bar);
        combined
    }

    #[test]
    fn test_file_names() {
        let dir = TempDir::new().unwrap();
        let mut request = setup_request(&dir);
        assert_eq!(request.file_name(Dimension::Weekday), "foo_and_bar_by_weekday.png");

        request.group_by = GroupBy::ByDeveloper;
        request.format = OutputFormat::Svg;
        assert_eq!(request.file_name(Dimension::Hour), "foo_and_bar_by_hour_dev.svg");

        request.group_by = GroupBy::ByRepository;
        request.normalize = true;
        assert_eq!(
            request.file_name(Dimension::Week),
            "foo_and_bar_by_week_repo_normalized.svg"
        );
    }

    #[test]
    fn test_titles_and_axis_labels() {
        let dir = TempDir::new().unwrap();
        let mut request = setup_request(&dir);
        assert_eq!(request.title(Dimension::Month), "Activity by Month");
        assert_eq!(request.y_label(), "Commits");

        request.mode = AnalysisMode::Lines;
        request.group_by = GroupBy::ByRepository;
        assert_eq!(request.title(Dimension::Month), "Activity by Month (repo)");
        assert_eq!(request.y_label(), "Lines of Code");

        request.normalize = true;
        assert_eq!(
            request.title(Dimension::Weekday),
            "Normalized Activity by Weekday (repo)"
        );
        assert_eq!(request.y_label(), "Proportion");
    }

    #[test]
    fn test_bar_chart_for_stacked() {
        let dir = TempDir::new().unwrap();
        let mut request = setup_request(&dir);
        request.group_by = GroupBy::ByDeveloper;

        let stacked = group_activity(&setup_combined(), Dimension::Weekday, request.group_by);
        let chart = bar_chart_for(&stacked, &request);

        assert_eq!(chart.layout, BarLayout::Stacked);
        assert_eq!(chart.x_label, "Weekdays");
        assert_eq!(chart.labels.len(), 7);
        let keys: Vec<&str> = chart.series.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Alice", "Bob"]);
        assert_eq!(chart.series[0].1[1], 3.0);
        assert_eq!(chart.series[0].1[5], 2.0);
        assert!(chart.validate().is_ok());
    }

    #[test]
    fn test_bar_chart_for_normalized() {
        let dir = TempDir::new().unwrap();
        let mut request = setup_request(&dir);
        request.group_by = GroupBy::ByRepository;
        request.normalize = true;

        let stacked = group_activity(&setup_combined(), Dimension::Weekday, request.group_by);
        let chart = bar_chart_for(&stacked, &request);

        assert_eq!(chart.layout, BarLayout::Clustered);
        let (key, values) = &chart.series[1];
        assert_eq!(key, "foo");
        assert_eq!(values[1], 0.75);
        assert_eq!(values[5], 0.25);
    }

    #[test]
    fn test_mismatched_categories_are_rejected() {
        let dir = TempDir::new().unwrap();
        let labels = Dimension::Weekday.labels();
        let chart = BarChart {
            title: "Broken".to_string(),
            x_label: "Weekdays",
            y_label: "Commits",
            labels,
            series: vec![("All".to_string(), vec![1.0, 2.0])],
            layout: BarLayout::Stacked,
        };

        let path = dir.path().join("broken.png");
        let err = render_bar_chart(&chart, &path).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MismatchedCategories {
                expected: 7,
                found: 2,
                ..
            }
        ));
        assert!(fs::metadata(&path).is_err());
    }

    #[test]
    fn test_unsupported_suffix() {
        let dir = TempDir::new().unwrap();
        let stacked = group_activity(&setup_combined(), Dimension::Month, GroupBy::Flat);
        let chart = bar_chart_for(&stacked, &setup_request(&dir));

        let err = render_bar_chart(&chart, &dir.path().join("chart.jpg")).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
        let err = render_bar_chart(&chart, &PathBuf::from("no_suffix")).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_generate_charts() {
        let dir = TempDir::new().unwrap();
        let combined = setup_combined();

        for (format, group_by) in [
            (OutputFormat::Png, GroupBy::Flat),
            (OutputFormat::Svg, GroupBy::ByDeveloper),
        ] {
            let mut request = setup_request(&dir);
            request.format = format;
            request.group_by = group_by;

            let written = generate_charts(&combined, &request).unwrap();
            assert_eq!(written.len(), 4);
            for (path, dimension) in written.iter().zip(Dimension::ALL) {
                assert_eq!(path, &dir.path().join(request.file_name(dimension)));
                let metadata = fs::metadata(path).unwrap();
                assert!(metadata.len() > 0);
            }
        }
        assert!(dir.path().join("foo_and_bar_by_weekday.png").exists());
        assert!(dir.path().join("foo_and_bar_by_week_dev.svg").exists());
    }

    #[test]
    fn test_render_to_missing_directory() {
        let dir = TempDir::new().unwrap();
        let stacked = group_activity(&setup_combined(), Dimension::Weekday, GroupBy::Flat);
        let chart = bar_chart_for(&stacked, &setup_request(&dir));

        for name in ["chart.png", "chart.svg"] {
            let path = dir.path().join("missing").join(name);
            let err = render_bar_chart(&chart, &path).unwrap_err();
            assert!(matches!(err, RenderError::Backend { .. }), "{}: {:?}", name, err);
        }
    }

    #[test]
    fn test_generate_charts_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        let request = setup_request(&dir);
        // A directory in place of the hour chart makes that file unwritable.
        fs::create_dir(dir.path().join(request.file_name(Dimension::Hour))).unwrap();

        let err = generate_charts(&setup_combined(), &request).unwrap_err();
        assert!(matches!(err, RenderError::Backend { .. }));
        assert!(dir.path().join(request.file_name(Dimension::Weekday)).exists());
        assert!(!dir.path().join(request.file_name(Dimension::Month)).exists());
        assert!(!dir.path().join(request.file_name(Dimension::Week)).exists());
    }
}
