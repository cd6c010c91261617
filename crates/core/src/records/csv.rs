//! Quote-aware CSV parsing.
//!
//! Sheet exports quote any cell containing a comma, so amounts such as
//! `"1,250"` must survive as a single cell. Quotes toggle the quoted state and
//! are never emitted; a doubled quote inside a quoted cell is a literal quote.

/// Parses CSV text into rows of trimmed cells.
///
/// Newlines inside quoted cells belong to the cell. `\r` outside quotes is
/// dropped so `\r\n` line endings behave like `\n`. Empty lines are skipped.
/// An unterminated quote keeps everything up to the end of input.
#[must_use]
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => row.push(finish_field(&mut field)),
            '\r' if !in_quotes => {}
            '\n' if !in_quotes => {
                row.push(finish_field(&mut field));
                push_row(&mut rows, std::mem::take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(finish_field(&mut field));
        push_row(&mut rows, row);
    }

    rows
}

/// Parses a single CSV line into trimmed cells.
#[must_use]
pub fn parse_csv_line(line: &str) -> Vec<String> {
    parse_csv(line).into_iter().next().unwrap_or_default()
}

fn finish_field(field: &mut String) -> String {
    let value = std::mem::take(field);
    value.trim().to_string()
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    let is_empty_line = row.len() == 1 && row[0].is_empty();
    if !is_empty_line {
        rows.push(row);
    }
}
