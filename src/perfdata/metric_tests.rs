use super::*;

#[test]
fn renders_value_with_embedded_unit_and_empty_fields() {
    let metric = PerformanceData::new("time", "42ms");
    assert!(metric.validate().is_ok());
    assert_eq!(metric.to_string(), "time=42ms;;;;");
}

#[test]
fn renders_min_and_max_with_placeholders() {
    let metric = PerformanceData::new("label", "7").with_min("5").with_max("10");
    assert!(metric.validate().is_ok());
    assert_eq!(metric.to_string(), "label=7;;;5;10");
}

#[test]
fn renders_all_fields_with_explicit_unit() {
    let metric = PerformanceData::new("disk", "81")
        .with_unit("%")
        .with_warn("80")
        .with_crit("90")
        .with_min("0")
        .with_max("100");
    assert!(metric.validate().is_ok());
    assert_eq!(metric.to_string(), "disk=81%;80;90;0;100");
}

#[test]
fn quotes_labels_containing_whitespace() {
    let metric = PerformanceData::new("disk usage", "3GB");
    assert_eq!(metric.to_string(), "'disk usage'=3GB;;;;");
}

#[test]
fn rejects_min_greater_than_max() {
    let metric = PerformanceData::new("label", "7").with_min("10").with_max("5");
    assert_eq!(
        metric.validate(),
        Err(MetricRule::MinExceedsMax {
            min: "10".to_string(),
            max: "5".to_string(),
        })
    );
}

#[test]
fn rejects_empty_label() {
    assert_eq!(
        PerformanceData::new("  ", "1").validate(),
        Err(MetricRule::EmptyLabel)
    );
}

#[test]
fn rejects_forbidden_label_characters() {
    for (label, bad) in [("a=b", '='), ("a;b", ';'), ("it's", '\''), ("\"q\"", '"'), ("a|b", '|')] {
        assert_eq!(
            PerformanceData::new(label, "1").validate(),
            Err(MetricRule::LabelCharacter(bad)),
            "label {label:?}"
        );
    }
}

#[test]
fn rejects_non_numeric_value() {
    assert_eq!(
        PerformanceData::new("x", "fast").validate(),
        Err(MetricRule::InvalidValue("fast".to_string()))
    );
    assert_eq!(
        PerformanceData::new("x", "").validate(),
        Err(MetricRule::EmptyValue)
    );
}

#[test]
fn accepts_unknown_value_marker() {
    assert!(PerformanceData::new("x", "U").validate().is_ok());
}

#[test]
fn rejects_unrecognised_units() {
    assert_eq!(
        PerformanceData::new("x", "42parsecs").validate(),
        Err(MetricRule::UnknownUnit("parsecs".to_string()))
    );
    assert_eq!(
        PerformanceData::new("x", "42").with_unit("kg").validate(),
        Err(MetricRule::UnknownUnit("kg".to_string()))
    );
}

#[test]
fn units_are_case_sensitive() {
    assert!(PerformanceData::new("x", "1MB").validate().is_ok());
    assert!(PerformanceData::new("x", "1mb").validate().is_err());
}

#[test]
fn rejects_unit_given_twice() {
    assert_eq!(
        PerformanceData::new("x", "42ms").with_unit("ms").validate(),
        Err(MetricRule::ConflictingUnit)
    );
}

#[test]
fn rejects_malformed_ranges() {
    assert_eq!(
        PerformanceData::new("x", "1").with_warn("high").validate(),
        Err(MetricRule::InvalidRange {
            field: "warn",
            value: "high".to_string(),
        })
    );
    assert_eq!(
        PerformanceData::new("x", "1").with_crit("9:3").validate(),
        Err(MetricRule::InvalidRange {
            field: "crit",
            value: "9:3".to_string(),
        })
    );
}

#[test]
fn accepts_nagios_range_syntax() {
    let metric = PerformanceData::new("x", "1")
        .with_warn("~:10")
        .with_crit("@20:30");
    assert!(metric.validate().is_ok());
}

#[test]
fn rejects_non_numeric_bounds() {
    assert_eq!(
        PerformanceData::new("x", "1").with_min("low").validate(),
        Err(MetricRule::InvalidNumber {
            field: "min",
            value: "low".to_string(),
        })
    );
    assert_eq!(
        PerformanceData::new("x", "1").with_max("10ms").validate(),
        Err(MetricRule::InvalidNumber {
            field: "max",
            value: "10ms".to_string(),
        })
    );
}

#[test]
fn empty_optional_fields_count_as_absent() {
    let metric = PerformanceData::new("x", "1").with_warn("").with_min(" ");
    assert!(metric.validate().is_ok());
    assert_eq!(metric.to_string(), "x=1;;;;");
}

#[test]
fn parses_full_metric_text() {
    let metric: PerformanceData = "load1=0.52;1;2;0;8".parse().unwrap();
    assert_eq!(metric.label, "load1");
    assert_eq!(metric.value, "0.52");
    assert_eq!(metric.warn.as_deref(), Some("1"));
    assert_eq!(metric.crit.as_deref(), Some("2"));
    assert_eq!(metric.min.as_deref(), Some("0"));
    assert_eq!(metric.max.as_deref(), Some("8"));
}

#[test]
fn parses_quoted_label_and_missing_trailing_fields() {
    let metric: PerformanceData = "'disk usage'=3GB;;90".parse().unwrap();
    assert_eq!(metric.label, "disk usage");
    assert_eq!(metric.value, "3GB");
    assert_eq!(metric.warn, None);
    assert_eq!(metric.crit.as_deref(), Some("90"));
    assert_eq!(metric.to_string(), "'disk usage'=3GB;;90;;");
}

#[test]
fn parse_rejects_text_without_value() {
    assert!(matches!(
        "novalue".parse::<PerformanceData>(),
        Err(PluginError::InvalidMetric { .. })
    ));
    assert!(matches!(
        "x=1;;;10;5".parse::<PerformanceData>(),
        Err(PluginError::InvalidMetric {
            rule: MetricRule::MinExceedsMax { .. },
            ..
        })
    ));
}
