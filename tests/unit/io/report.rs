//! Tests for JSON report export

#[cfg(test)]
mod tests {
    use slicescan::AnomalyPipeline;
    use slicescan::detection::AnalysisMode;
    use slicescan::io::report::write_report;

    // Tests reports are written as parseable JSON in new directories
    // Verified by writing the compact debug representation
    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("slice_findings.json");
        let result = AnomalyPipeline::default()
            .analyze_synthetic(0.5, AnalysisMode::Anomaly)
            .unwrap();

        write_report(&result, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(
            json["summary"]["total_findings"],
            result.summary.total_findings
        );
        assert!(text.contains("\n  \"findings\""));
    }

    // Tests unwritable destinations surface as file system errors
    // Verified by ignoring write failures
    #[test]
    fn test_write_report_into_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let result = AnomalyPipeline::default()
            .analyze_synthetic(0.5, AnalysisMode::Anomaly)
            .unwrap();

        let error = write_report(&result, &blocker.join("report.json")).unwrap_err();
        assert!(matches!(error, slicescan::DetectionError::FileSystem { .. }));
    }
}
