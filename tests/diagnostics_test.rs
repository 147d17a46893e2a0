//! Test diagnostics module functionality
#![cfg(feature = "diagnostics")]

use ariadne::Source;
use chainbeet::{
    chart::{ChartError, ParseOptions, parse_chart},
    diagnostics::{SimpleSource, collect_chart_reports, emit_chart_error},
};

const UNMATCHED: &str =
    r#"{"info": {"bpm": 120, "dir": "x", "delay": 0}, "notes": [[0, 2, 1, 0, 0, 10], [1, 2, 1, 0, 0, 21, 5]]}"#;

fn render(name: &str, source: &str, errors: &[ChartError]) -> Vec<String> {
    collect_chart_reports(name, source, errors)
        .into_iter()
        .map(|report| {
            let mut buf = Vec::new();
            report
                .write((name.to_string(), Source::from(source)), &mut buf)
                .unwrap();
            String::from_utf8(buf).unwrap()
        })
        .collect()
}

#[test]
fn test_simple_source_creation() {
    let source = SimpleSource::new("chart.json", UNMATCHED);
    assert_eq!(source.text(), UNMATCHED);
    assert_eq!(source.name(), "chart.json");
}

#[test]
fn test_error_span_points_at_event() {
    let err = parse_chart(UNMATCHED, ParseOptions::default()).unwrap_err();
    assert_eq!(&UNMATCHED[err.span().as_range()], "[1, 2, 1, 0, 0, 21, 5]");
}

#[test]
fn test_report_for_unmatched_group() {
    let err = parse_chart(UNMATCHED, ParseOptions::default()).unwrap_err();
    let rendered = render("chart.json", UNMATCHED, &[err]);
    assert_eq!(rendered.len(), 1);
    assert!(rendered[0].contains("unmatched group"), "{}", rendered[0]);
    assert!(rendered[0].contains("chart.json"), "{}", rendered[0]);
}

#[test]
fn test_reports_for_every_kind_of_error() {
    let sources = [
        "{\"info\": ",
        r#"{"info": {"bpm": "fast", "dir": "x", "delay": 0}, "notes": []}"#,
        r#"{"info": {"bpm": 0, "dir": "x", "delay": 0}, "notes": []}"#,
        r#"{"info": {"bpm": 120, "dir": "x", "delay": 0}, "notes": [[0, 2, 1, 0, 0, 77]]}"#,
        r#"{"info": {"bpm": 120, "dir": "x", "delay": 0}, "notes": [[0, 2, 1, 0, 0, 20, 1]]}"#,
        r#"{"info": {"bpm": 120, "dir": "x", "delay": 0}, "notes": [[0, 2, 1, 0, 0, 20, 1], [0, 2, 1, 1, 0, 20, 1]]}"#,
    ];
    for source in sources {
        let err = parse_chart(source, ParseOptions::default()).unwrap_err();
        let rendered = render("chart.json", source, std::slice::from_ref(&err));
        assert_eq!(rendered.len(), 1);
        assert!(!rendered[0].is_empty(), "{err}");
    }
}

#[test]
fn test_empty_errors() {
    assert!(render("chart.json", UNMATCHED, &[]).is_empty());
}

#[test]
fn test_emit_chart_error() {
    let err = parse_chart(UNMATCHED, ParseOptions::default()).unwrap_err();
    // Note: here we just verify the function can be called normally
    emit_chart_error("chart.json", UNMATCHED, &err);
}
