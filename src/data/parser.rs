use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::{CellValue, Dataset, Row};

// ---------------------------------------------------------------------------
// CSV text → Dataset
// ---------------------------------------------------------------------------

/// Parse comma-separated text into a [`Dataset`].
///
/// * Surrounding blank space of the whole input is ignored; empty input
///   yields an empty dataset.
/// * The first line is the header. Every field is trimmed.
/// * Quoting is not supported: a comma always separates fields.
/// * Short lines are padded with nulls, surplus fields are dropped.
/// * Fields are coerced with [`coerce_field`].
pub fn parse_csv(text: &str) -> Result<Dataset> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Dataset::default());
    }

    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All);

    // Lines are split here rather than by the reader, which would drop
    // empty lines. Every line after the header is one row.
    let mut lines = text.lines();

    let header: Vec<String> = match lines.next() {
        Some(line) => split_line(&builder, line)
            .context("reading CSV header")?
            .iter()
            .map(|h| h.to_string())
            .collect(),
        None => return Ok(Dataset::default()),
    };

    let mut rows = Vec::new();
    for (line_no, line) in lines.enumerate() {
        let record =
            split_line(&builder, line).with_context(|| format!("CSV line {}", line_no + 2))?;
        rows.push(build_row(&header, &record));
    }

    log::debug!(
        "Parsed {} rows across {} header fields",
        rows.len(),
        header.len()
    );

    Ok(Dataset::new(&header, rows))
}

/// Split a single line into trimmed fields. An empty line has no fields.
fn split_line(builder: &ReaderBuilder, line: &str) -> Result<StringRecord> {
    let mut reader = builder.from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

fn build_row(header: &[String], record: &StringRecord) -> Row {
    Row::from_pairs(header.iter().enumerate().map(|(i, name)| {
        let value = record.get(i).map(coerce_field).unwrap_or(CellValue::Null);
        (name.clone(), value)
    }))
}

/// Coerce one raw field.
///
/// Empty after trimming → null; a token that parses in full as a finite
/// number → number; anything else → the trimmed text.
pub fn coerce_field(raw: &str) -> CellValue {
    let s = raw.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => CellValue::Number(v),
        _ => CellValue::Text(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn parses_numeric_rows() {
        let ds = parse_csv("a,b\n1,2\n3,4").unwrap();
        assert_eq!(ds.columns, vec!["a", "b"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].get("a"), &num(1.0));
        assert_eq!(ds.rows[0].get("b"), &num(2.0));
        assert_eq!(ds.rows[1].get("a"), &num(3.0));
        assert_eq!(ds.rows[1].get("b"), &num(4.0));
    }

    #[test]
    fn empty_fields_become_null() {
        let ds = parse_csv("a,b\n,2\nfoo,").unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].get("a"), &CellValue::Null);
        assert_eq!(ds.rows[0].get("b"), &num(2.0));
        assert_eq!(ds.rows[1].get("a"), &text("foo"));
        assert_eq!(ds.rows[1].get("b"), &CellValue::Null);
    }

    #[test]
    fn empty_input_yields_empty_dataset() {
        assert!(parse_csv("").unwrap().is_empty());
        assert!(parse_csv("  \n\n ").unwrap().is_empty());
    }

    #[test]
    fn header_only_has_columns_but_no_rows() {
        let ds = parse_csv("Country, 2020 ,2021\n").unwrap();
        assert_eq!(ds.columns, vec!["Country", "2020", "2021"]);
        assert!(ds.is_empty());
    }

    #[test]
    fn row_count_matches_data_lines_and_ignores_trailing_blank() {
        let ds = parse_csv("\nx,y\n1,a\n2,b\n3,c\n\n").unwrap();
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn blank_interior_lines_become_null_rows() {
        let ds = parse_csv("a,b\n1,2\n\n3,4").unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows[1].get("a"), &CellValue::Null);
        assert_eq!(ds.rows[1].get("b"), &CellValue::Null);
        assert_eq!(ds.rows[2].get("a"), &num(3.0));

        let spaced = parse_csv("a,b\n1,2\n   \n3,4").unwrap();
        assert_eq!(spaced, ds);
    }

    #[test]
    fn short_lines_are_padded_and_long_lines_truncated() {
        let ds = parse_csv("a,b,c\n1\n1,2,3,4").unwrap();
        assert_eq!(ds.rows[0].get("b"), &CellValue::Null);
        assert_eq!(ds.rows[0].get("c"), &CellValue::Null);
        assert_eq!(ds.rows[1].get("c"), &num(3.0));
        assert_eq!(ds.columns.len(), 3);
    }

    #[test]
    fn quotes_are_not_special() {
        let ds = parse_csv("name,score\n\"Congo, Dem. Rep.\",30").unwrap();
        // The comma inside quotes splits the field: a documented limitation.
        assert_eq!(ds.rows[0].get("name"), &text("\"Congo"));
        assert_eq!(ds.rows[0].get("score"), &text("Dem. Rep.\""));
    }

    #[test]
    fn duplicate_header_keeps_last_value() {
        let ds = parse_csv("k,k\n1,2").unwrap();
        assert_eq!(ds.columns, vec!["k"]);
        assert_eq!(ds.rows[0].get("k"), &num(2.0));
    }

    #[test]
    fn carriage_returns_are_trimmed() {
        let ds = parse_csv("a,b\r\n1,x\r\n").unwrap();
        assert_eq!(ds.columns, vec!["a", "b"]);
        assert_eq!(ds.rows[0].get("b"), &text("x"));
    }

    #[test]
    fn coercion_requires_the_whole_token() {
        assert_eq!(coerce_field(" 12.5 "), num(12.5));
        assert_eq!(coerce_field("-3"), num(-3.0));
        assert_eq!(coerce_field("1e3"), num(1000.0));
        assert_eq!(coerce_field("12abc"), text("12abc"));
        assert_eq!(coerce_field("<5"), text("<5"));
        assert_eq!(coerce_field("   "), CellValue::Null);
    }

    #[test]
    fn non_finite_tokens_stay_text() {
        assert_eq!(coerce_field("NaN"), text("NaN"));
        assert_eq!(coerce_field("inf"), text("inf"));
        assert_eq!(coerce_field("1e999"), text("1e999"));
    }

    #[test]
    fn coercion_is_idempotent_for_numbers() {
        for raw in ["0", "42", "-0.125", "2019", "3.3333333333333335"] {
            let first = coerce_field(raw);
            let again = coerce_field(&first.to_string());
            assert_eq!(first, again, "re-coercing {raw}");
        }
    }

    #[test]
    fn columns_may_mix_types() {
        let ds = parse_csv("v\n1\nn/a\n").unwrap();
        assert_eq!(ds.rows[0].get("v"), &num(1.0));
        assert_eq!(ds.rows[1].get("v"), &text("n/a"));
    }
}
