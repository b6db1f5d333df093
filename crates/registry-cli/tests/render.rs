use pretty_assertions::assert_eq;
use serde_json::json;

use registry_cli::render::{
    EMPTY_CELL, SEARCH_RESULT_LIMIT, data_preview, records_table, search_report, standard_info,
    statistics_text,
};
use registry_model::{DatasetStatistics, Record, SourceAttribution, Standard};

fn record(value: serde_json::Value) -> Record {
    serde_json::from_value(value).expect("record")
}

fn boards(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| record(json!({ "board_id": i, "name": format!("Board {i}") })))
        .collect()
}

#[test]
fn statistics_list_at_most_ten_field_names() {
    let stats = DatasetStatistics {
        total_records: 1200,
        fields: (1..=12).map(|i| format!("f{i}")).collect(),
    };
    let text = statistics_text(&stats);
    assert!(text.contains("Total Records: 1,200"));
    assert!(text.contains("Fields:        12"));
    assert!(text.contains("f1, f2, f3, f4, f5, f6, f7, f8, f9, f10 (+2 more)"));
    assert!(!text.contains("f11"));
}

#[test]
fn statistics_without_overflow_have_no_suffix() {
    let stats = DatasetStatistics {
        total_records: 2,
        fields: vec!["a".into(), "b".into()],
    };
    assert!(!statistics_text(&stats).contains("more)"));
}

#[test]
fn source_defaults_are_filled_in() {
    let standard = Standard {
        id: "boards".into(),
        title: "School Boards".into(),
        source: Some(SourceAttribution::default()),
        tags: vec!["education".into(), "ontario".into()],
        ..Standard::default()
    };
    let info = standard_info(&standard);
    assert!(info.starts_with("School Boards\n"));
    assert!(info.contains("Source:       N/A <#>"));
    assert!(info.contains("Tags:         education, ontario"));
}

#[test]
fn standard_without_source_has_no_source_line() {
    let info = standard_info(&Standard {
        id: "x".into(),
        ..Standard::default()
    });
    assert!(!info.contains("Source:"));
    assert!(!info.contains("Tags:"));
}

#[test]
fn preview_shows_first_ten_records() {
    let records = boards(12);
    let preview = data_preview(&records);
    assert!(preview.starts_with("Data Preview (showing 10 of 12 records):"));
    assert!(preview.contains("Record 10\n  board_id: 10\n  name: Board 10"));
    assert!(!preview.contains("Record 11"));
}

#[test]
fn search_report_adds_footer_past_limit() {
    let records = boards(SEARCH_RESULT_LIMIT + 5);
    let report = search_report("board", &records, SEARCH_RESULT_LIMIT);
    assert!(report.starts_with("Found 55 result(s) for 'board':"));
    assert!(report.contains("Result 50\n"));
    assert!(!report.contains("Result 51"));
    assert!(report.ends_with("Showing first 50 of 55 results."));
}

#[test]
fn search_report_under_limit_has_no_footer() {
    let records = boards(3);
    let report = search_report("board", &records, SEARCH_RESULT_LIMIT);
    assert!(!report.contains("Showing first"));
}

#[test]
fn table_columns_follow_first_record() {
    let records = vec![
        record(json!({ "board_id": 1200, "board_name": "Ottawa" })),
        record(json!({ "board_name": "   ", "extra": "dropped" })),
    ];
    let table = records_table(&records, Some(50)).expect("table");
    let header: Vec<String> = table
        .header()
        .expect("header")
        .cell_iter()
        .map(|cell| cell.content())
        .collect();
    assert_eq!(header, vec!["Board ID", "Board Name"]);

    let rendered = table.to_string();
    assert!(rendered.contains("1,200"));
    assert!(rendered.contains(EMPTY_CELL));
    assert!(!rendered.contains("dropped"));
}

#[test]
fn table_truncates_unless_full() {
    let long = "x".repeat(80);
    let records = vec![record(json!({ "note": long }))];

    let truncated = records_table(&records, Some(50)).expect("table");
    let cell = truncated
        .row_iter()
        .next()
        .and_then(|row| row.cell_iter().next())
        .map(|cell| cell.content())
        .expect("cell");
    assert_eq!(cell, format!("{}...", "x".repeat(50)));

    let full = records_table(&records, None).expect("table");
    let cell = full
        .row_iter()
        .next()
        .and_then(|row| row.cell_iter().next())
        .map(|cell| cell.content())
        .expect("cell");
    assert_eq!(cell, "x".repeat(80));
}

#[test]
fn empty_dataset_has_no_table() {
    assert!(records_table(&[], None).is_none());
}
