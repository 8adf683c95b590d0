use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single parsed CSV field
// ---------------------------------------------------------------------------

/// A dynamically-typed CSV field after best-effort coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Finite floating-point number (the whole token parsed).
    Number(f64),
    /// Non-numeric text, already trimmed.
    Text(String),
    Null,
}

static NULL_CELL: CellValue = CellValue::Null;

impl CellValue {
    /// The numeric value, if this cell holds one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Truthiness as the dashboards use it for "has a value":
    /// null, empty text and zero are all falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Number(v) => *v != 0.0,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Null => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            // Null renders blank in tables and is never offered as a choice.
            CellValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one data line of the CSV
// ---------------------------------------------------------------------------

/// One parsed record keyed by column name.
///
/// Every row of a [`Dataset`] carries every header column; fields missing
/// from a short source line are stored as [`CellValue::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: BTreeMap<String, CellValue>,
}

impl Row {
    /// Build a row from `(column, value)` pairs. Later duplicates win.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, CellValue)>,
    {
        Row {
            fields: pairs.into_iter().collect(),
        }
    }

    /// Value of `column`; absent columns read as null.
    pub fn get(&self, column: &str) -> &CellValue {
        self.fields.get(column).unwrap_or(&NULL_CELL)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the canonical row sequence of one dashboard
// ---------------------------------------------------------------------------

/// The full parsed dataset: header columns plus the ordered rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Distinct header names in order of first appearance.
    pub columns: Vec<String>,
    /// All data rows, in source order.
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Assemble a dataset from raw header tokens and rows.
    /// Duplicate header names are collapsed onto their first position.
    pub fn new(header: &[String], rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::with_capacity(header.len());
        for name in header {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }
        Dataset { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_reads_as_null() {
        let row = Row::from_pairs([("a".to_string(), CellValue::Number(1.0))]);
        assert_eq!(row.get("a"), &CellValue::Number(1.0));
        assert!(row.get("b").is_null());
    }

    #[test]
    fn duplicate_pairs_keep_last_value() {
        let row = Row::from_pairs([
            ("a".to_string(), CellValue::Number(1.0)),
            ("a".to_string(), CellValue::Text("x".into())),
        ]);
        assert_eq!(row.get("a"), &CellValue::Text("x".into()));
    }

    #[test]
    fn truthiness_treats_zero_and_empty_as_absent() {
        assert!(!CellValue::Number(0.0).is_truthy());
        assert!(!CellValue::Text(String::new()).is_truthy());
        assert!(!CellValue::Null.is_truthy());
        assert!(CellValue::Number(-2.5).is_truthy());
        assert!(CellValue::Text("Chad".into()).is_truthy());
    }

    #[test]
    fn display_uses_shortest_number_form() {
        assert_eq!(CellValue::Number(2019.0).to_string(), "2019");
        assert_eq!(CellValue::Number(27.5).to_string(), "27.5");
        assert_eq!(CellValue::Null.to_string(), "");
    }

    #[test]
    fn dataset_columns_deduplicate_in_first_order() {
        let header: Vec<String> = ["b", "a", "b"].iter().map(|s| s.to_string()).collect();
        let ds = Dataset::new(&header, Vec::new());
        assert_eq!(ds.columns, vec!["b", "a"]);
        assert!(ds.is_empty());
    }
}
