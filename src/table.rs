use std::borrow::Cow;
use std::fmt::Write as _;

/// Renders `rows` under `headers` as space-separated, padded columns.
/// Numeric cells are right-aligned, everything else left-aligned.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    let mut numeric = vec![!rows.is_empty(); column_count];

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(cell.chars().count());
            if !cell.is_empty() && !is_numeric_cell(cell) {
                numeric[idx] = false;
            }
        }
    }

    let mut output = String::new();
    let header_line = format_row(headers, &widths, &vec![false; column_count]);
    let _ = writeln!(output, "{header_line}");

    let separator = widths
        .iter()
        .map(|w| "-".repeat((*w).max(3)))
        .collect::<Vec<_>>();
    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<_>>();
    let _ = writeln!(
        output,
        "{}",
        format_row(&separator, &separator_widths, &vec![false; column_count])
    );

    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths, &numeric));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

/// Whole numbers without decimals, everything else with two.
pub fn format_number(value: f64) -> String {
    if value.is_nan() || value.is_infinite() {
        String::new()
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

pub fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn is_numeric_cell(value: &str) -> bool {
    value.trim_end_matches('%').parse::<f64>().is_ok()
}

fn format_row(values: &[String], widths: &[usize], right_align: &[bool]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate().take(widths.len()) {
        let sanitized = sanitize_cell(value);
        let width = widths[idx];
        let cell = if right_align.get(idx).copied().unwrap_or(false) {
            format!("{:>width$}", sanitized)
        } else {
            format!("{:<width$}", sanitized)
        };
        cells.push(cell);
    }
    cells.join("  ").trim_end().to_string()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
