//! Text and table rendering of registry query results.
//!
//! Everything here is presentation policy: header humanizing, cell
//! formatting, truncation and result caps. The loader never applies any of it.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::Value;

use registry_model::{DatasetStatistics, Record, RegistryOverview, Standard, value_text};

/// Placeholder for null and blank cells.
pub const EMPTY_CELL: &str = "—";
/// Characters kept per table cell before truncation.
pub const CELL_MAX_CHARS: usize = 50;
/// Characters of description shown in the overview.
pub const DESCRIPTION_MAX_CHARS: usize = 150;
/// Field names listed in statistics before "(+N more)".
pub const STATISTICS_FIELD_LIMIT: usize = 10;
/// Records shown in a data preview.
pub const PREVIEW_RECORD_LIMIT: usize = 10;
/// Search results displayed by default.
pub const SEARCH_RESULT_LIMIT: usize = 50;

/// Humanize a field name: underscores become spaces, words are title-cased,
/// and `Id` is spelled `ID`.
pub fn format_header(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut previous_alphabetic = false;
    for ch in field.replace('_', " ").chars() {
        if ch.is_alphabetic() {
            if previous_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            out.push(ch);
            previous_alphabetic = false;
        }
    }
    out.replace("Id", "ID")
}

/// Display form of a table cell.
///
/// Missing and null values and blank strings show as [`EMPTY_CELL`]. Integers
/// get thousands separators and floats two decimals.
pub fn format_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => EMPTY_CELL.to_string(),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                EMPTY_CELL.to_string()
            } else {
                trimmed.to_string()
            }
        }
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => format_integer(&n.to_string()),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => format!("{f:.2}"),
            None => n.to_string(),
        },
        Some(other) => value_text(other).into_owned(),
    }
}

/// Insert thousands separators into an integer's decimal form.
pub fn format_integer(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_count(count: usize) -> String {
    format_integer(&count.to_string())
}

/// Keep at most `max` characters, marking cut text with `...`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Returns true for values a preview leaves out: null, empty strings and
/// collections, zero and `false`.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Metadata block for one standard.
pub fn standard_info(standard: &Standard) -> String {
    let mut lines = vec![
        standard.title.clone(),
        String::new(),
        format!("ID:           {}", standard.id),
        format!("Description:  {}", standard.description),
        format!("Version:      {}", standard.version),
        format!("Maintainer:   {}", standard.maintainer),
        format!("Last Updated: {}", standard.last_updated),
    ];
    if let Some(source) = &standard.source {
        let name = if source.name.is_empty() { "N/A" } else { &source.name };
        let url = if source.url.is_empty() { "#" } else { &source.url };
        lines.push(format!("Source:       {name} <{url}>"));
    }
    if !standard.tags.is_empty() {
        lines.push(format!("Tags:         {}", standard.tags.join(", ")));
    }
    lines.join("\n")
}

/// Statistics block: record count, field count and the leading field names.
pub fn statistics_text(stats: &DatasetStatistics) -> String {
    let mut lines = vec![format!(
        "Total Records: {}",
        format_count(stats.total_records)
    )];
    if !stats.fields.is_empty() {
        lines.push(format!("Fields:        {}", stats.field_count()));
        let shown: Vec<&str> = stats
            .fields
            .iter()
            .take(STATISTICS_FIELD_LIMIT)
            .map(String::as_str)
            .collect();
        let mut names = format!("Field Names:   {}", shown.join(", "));
        if stats.fields.len() > STATISTICS_FIELD_LIMIT {
            names.push_str(&format!(
                " (+{} more)",
                stats.fields.len() - STATISTICS_FIELD_LIMIT
            ));
        }
        lines.push(names);
    }
    lines.join("\n")
}

/// `field: value` lines for the non-blank values of a record.
pub fn record_lines(record: &Record) -> Vec<String> {
    record
        .iter()
        .filter(|(_, value)| !is_blank(value))
        .map(|(field, value)| format!("{field}: {}", value_text(value)))
        .collect()
}

fn record_block(heading: &str, record: &Record) -> String {
    let mut block = heading.to_string();
    for line in record_lines(record) {
        block.push_str("\n  ");
        block.push_str(&line);
    }
    block
}

/// Preview of the first records of a dataset.
pub fn data_preview(records: &[Record]) -> String {
    let shown = records.len().min(PREVIEW_RECORD_LIMIT);
    let mut sections = vec![format!(
        "Data Preview (showing {shown} of {} records):",
        format_count(records.len())
    )];
    for (i, record) in records.iter().take(shown).enumerate() {
        sections.push(record_block(&format!("Record {}", i + 1), record));
    }
    sections.join("\n\n")
}

/// Search results capped at `limit`, with a footer when truncated.
pub fn search_report(query: &str, results: &[Record], limit: usize) -> String {
    let mut sections = vec![format!(
        "Found {} result(s) for '{query}':",
        format_count(results.len())
    )];
    for (i, record) in results.iter().take(limit).enumerate() {
        sections.push(record_block(&format!("Result {}", i + 1), record));
    }
    if results.len() > limit {
        sections.push(format!(
            "Showing first {limit} of {} results.",
            format_count(results.len())
        ));
    }
    sections.join("\n\n")
}

/// Overview header lines: standard and record totals.
pub fn overview_header(overview: &RegistryOverview) -> String {
    format!(
        "Total Standards: {}\nTotal Records:   {}",
        overview.standard_count(),
        format_count(overview.total_records)
    )
}

pub fn overview_table(overview: &RegistryOverview) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Title"),
        header_cell("ID"),
        header_cell("Version"),
        header_cell("Last Updated"),
        header_cell("Records"),
        header_cell("Tags"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for entry in &overview.entries {
        let standard = &entry.standard;
        table.add_row(vec![
            Cell::new(&standard.title).add_attribute(Attribute::Bold),
            id_cell(&standard.id),
            Cell::new(&standard.version),
            Cell::new(&standard.last_updated),
            count_cell(entry.record_count),
            Cell::new(standard.tags.join(", ")),
            Cell::new(truncate_chars(&standard.description, DESCRIPTION_MAX_CHARS)),
        ]);
    }
    table
}

pub fn standards_table(standards: &[Standard]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Version"),
        header_cell("Maintainer"),
        header_cell("Tags"),
    ]);
    apply_table_style(&mut table);
    for standard in standards {
        table.add_row(vec![
            id_cell(&standard.id),
            Cell::new(&standard.title),
            Cell::new(&standard.version),
            Cell::new(&standard.maintainer),
            Cell::new(standard.tags.join(", ")),
        ]);
    }
    table
}

/// All records as a table, columns ordered by the first record's fields.
///
/// Returns `None` when there is nothing to show. `max_chars` truncates cells
/// when set.
pub fn records_table(records: &[Record], max_chars: Option<usize>) -> Option<Table> {
    let first = records.first()?;
    let fields = first.field_names();
    if fields.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(
        fields
            .iter()
            .map(|field| header_cell(&format_header(field)))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for record in records {
        table.add_row(
            fields
                .iter()
                .map(|field| {
                    let text = format_cell(record.get(field));
                    match max_chars {
                        Some(max) => dim_if_empty(truncate_chars(&text, max)),
                        None => dim_if_empty(text),
                    }
                })
                .collect::<Vec<_>>(),
        );
    }
    Some(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn id_cell(id: &str) -> Cell {
    Cell::new(id).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(format_count(count))
    } else {
        dim_cell("0")
    }
}

fn dim_if_empty(text: String) -> Cell {
    if text == EMPTY_CELL {
        dim_cell(text)
    } else {
        Cell::new(text)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
