use std::cmp::Ordering;
use std::collections::BTreeSet;

use thiserror::Error;

use super::model::{CellValue, Dataset, Row};

// ---------------------------------------------------------------------------
// Projection failures shown to the user
// ---------------------------------------------------------------------------

/// Conditions that abort rendering of a view. The `Display` text is the
/// status message shown in place of the chart.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("No data available.")]
    EmptyDataset,
    #[error("No valid year columns found in CSV.")]
    NoYearColumns,
    #[error("Please select at least one country.")]
    NoSelection,
}

// ---------------------------------------------------------------------------
// Country label rule
// ---------------------------------------------------------------------------

/// Fields consulted, in order, for a row's display label.
pub const COUNTRY_LABEL_FIELDS: [&str; 2] = ["Country", "country"];

/// Label used when none of [`COUNTRY_LABEL_FIELDS`] holds a value.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Display label of a row: the first truthy value among
/// [`COUNTRY_LABEL_FIELDS`], else [`UNKNOWN_LABEL`].
pub fn country_label(row: &Row) -> String {
    COUNTRY_LABEL_FIELDS
        .iter()
        .map(|field| row.get(field))
        .find(|value| value.is_truthy())
        .map(|value| value.to_string())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

// ---------------------------------------------------------------------------
// Year columns
// ---------------------------------------------------------------------------

/// A year column is named by exactly four ASCII digits.
pub fn is_year_column(name: &str) -> bool {
    name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit())
}

/// The year column with the greatest integer value.
pub fn latest_year_column(dataset: &Dataset) -> Result<&str, ProjectionError> {
    if dataset.is_empty() {
        return Err(ProjectionError::EmptyDataset);
    }
    dataset
        .columns
        .iter()
        .filter(|c| is_year_column(c))
        .filter_map(|c| c.parse::<u16>().ok().map(|year| (year, c.as_str())))
        .max_by_key(|(year, _)| *year)
        .map(|(_, name)| name)
        .ok_or(ProjectionError::NoYearColumns)
}

// ---------------------------------------------------------------------------
// Ranking projector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub label: String,
    pub value: f64,
}

/// Top-N ranking for the latest year column.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// The year column the ranking was computed on.
    pub year_column: String,
    /// Entries in descending value order.
    pub entries: Vec<RankedEntry>,
}

/// Rank rows by their value in the latest year column.
///
/// Rows without a numeric value in that column are skipped. Ties keep
/// their source order. At most `top_n` entries are returned.
pub fn rank_latest_year(dataset: &Dataset, top_n: usize) -> Result<Ranking, ProjectionError> {
    let year_column = latest_year_column(dataset)?;

    let mut scored: Vec<(&Row, f64)> = dataset
        .rows
        .iter()
        .filter_map(|row| row.get(year_column).as_f64().map(|v| (row, v)))
        .collect();

    // `sort_by` is stable, so equal scores stay in row order. Values are
    // finite, and `partial_cmp` keeps -0 and 0 equal.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let entries = scored
        .into_iter()
        .take(top_n)
        .map(|(row, value)| RankedEntry {
            label: country_label(row),
            value,
        })
        .collect();

    Ok(Ranking {
        year_column: year_column.to_string(),
        entries,
    })
}

// ---------------------------------------------------------------------------
// Series projector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// Which columns identify the country and the year of a row.
#[derive(Debug, Clone, Copy)]
pub struct SeriesFields<'a> {
    pub country: &'a str,
    pub year: &'a str,
}

/// Chronological series of `metric` for one country.
///
/// A row contributes when its country matches, its year is numeric and
/// its metric is a non-zero number. A metric of exactly 0 is treated as
/// missing. Rows sharing a year keep their source order.
pub fn country_series(
    dataset: &Dataset,
    fields: SeriesFields<'_>,
    country: &str,
    metric: &str,
) -> Vec<SeriesPoint> {
    let mut points: Vec<(f64, f64)> = dataset
        .rows
        .iter()
        .filter(|row| matches_value(row.get(fields.country), country))
        .filter_map(|row| {
            let year = row.get(fields.year).as_f64()?;
            let metric_value = row.get(metric);
            if !metric_value.is_truthy() {
                return None;
            }
            Some((year, metric_value.as_f64()?))
        })
        .collect();

    points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    points
        .into_iter()
        .map(|(year, value)| SeriesPoint {
            year: year.trunc() as i32,
            value,
        })
        .collect()
}

fn matches_value(value: &CellValue, wanted: &str) -> bool {
    !value.is_null() && value.to_string() == wanted
}

// ---------------------------------------------------------------------------
// Distinct values
// ---------------------------------------------------------------------------

/// Sorted distinct non-null values of `field`, compared as strings.
pub fn distinct_values(dataset: &Dataset, field: &str) -> Vec<String> {
    dataset
        .rows
        .iter()
        .map(|row| row.get(field))
        .filter(|value| !value.is_null())
        .map(|value| value.to_string())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parser::parse_csv;
    use pretty_assertions::assert_eq;

    const FIELDS: SeriesFields<'static> = SeriesFields {
        country: "country",
        year: "year",
    };

    fn ghi() -> Dataset {
        parse_csv(
            "Country,2019,2018,Region\n\
             Chad,44.7,45.0,Africa\n\
             Yemen,45.9,43.2,Asia\n\
             Haiti,,40.1,Americas\n\
             Niger,30.2,31.0,Africa\n\
             Mali,n/a,22.0,Africa\n\
             Togo,30.2,29.0,Africa",
        )
        .unwrap()
    }

    fn trends() -> Dataset {
        parse_csv(
            "country,year,stunting_rate,undernourishment_rate\n\
             Peru,2010,23.0,9.1\n\
             Peru,2005,29.8,\n\
             Kenya,2005,35.5,30.0\n\
             Peru,2008,0,8.0\n\
             Peru,n/a,20.0,7.0\n\
             Peru,2005,28.0,11.0\n\
             Kenya,2010,26.0,21.0",
        )
        .unwrap()
    }

    #[test]
    fn latest_year_ignores_column_order() {
        assert_eq!(latest_year_column(&ghi()).unwrap(), "2019");
    }

    #[test]
    fn year_columns_need_exactly_four_digits() {
        assert!(is_year_column("1999"));
        assert!(!is_year_column("199"));
        assert!(!is_year_column("20190"));
        assert!(!is_year_column("y2019"));
        assert!(!is_year_column("２０１９"));
    }

    #[test]
    fn no_year_columns_is_reported() {
        let ds = parse_csv("Country,score\nChad,1").unwrap();
        assert_eq!(rank_latest_year(&ds, 10), Err(ProjectionError::NoYearColumns));
    }

    #[test]
    fn empty_dataset_is_reported() {
        let ds = parse_csv("").unwrap();
        assert_eq!(rank_latest_year(&ds, 10), Err(ProjectionError::EmptyDataset));
        let header_only = parse_csv("Country,2020").unwrap();
        assert_eq!(
            rank_latest_year(&header_only, 10),
            Err(ProjectionError::EmptyDataset)
        );
    }

    #[test]
    fn ranking_is_descending_and_skips_non_numeric() {
        let ranking = rank_latest_year(&ghi(), 10).unwrap();
        assert_eq!(ranking.year_column, "2019");
        let labels: Vec<&str> = ranking.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Yemen", "Chad", "Niger", "Togo"]);
        for pair in ranking.entries.windows(2) {
            assert!(pair[0].value >= pair[1].value);
        }
    }

    #[test]
    fn ranking_ties_keep_row_order() {
        let ranking = rank_latest_year(&ghi(), 10).unwrap();
        let niger = ranking.entries.iter().position(|e| e.label == "Niger");
        let togo = ranking.entries.iter().position(|e| e.label == "Togo");
        assert!(niger < togo);
    }

    #[test]
    fn ranking_treats_signed_zeros_as_ties() {
        let ds = parse_csv("Country,2020\nA,-0\nB,0\nC,1").unwrap();
        let ranking = rank_latest_year(&ds, 10).unwrap();
        let labels: Vec<&str> = ranking.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["C", "A", "B"]);
    }

    #[test]
    fn ranking_truncates_to_top_n() {
        assert_eq!(rank_latest_year(&ghi(), 2).unwrap().entries.len(), 2);
        assert_eq!(rank_latest_year(&ghi(), 0).unwrap().entries.len(), 0);
        assert_eq!(rank_latest_year(&ghi(), 50).unwrap().entries.len(), 4);
    }

    #[test]
    fn label_falls_back_to_lowercase_then_unknown() {
        let ds = parse_csv("country,Country,2020\nPeru,,1\n,,2\n,Chile,3").unwrap();
        let ranking = rank_latest_year(&ds, 10).unwrap();
        let labels: Vec<&str> = ranking.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Chile", "Unknown", "Peru"]);
    }

    #[test]
    fn series_is_filtered_and_sorted_by_year() {
        let series = country_series(&trends(), FIELDS, "Peru", "stunting_rate");
        assert_eq!(
            series,
            vec![
                SeriesPoint { year: 2005, value: 29.8 },
                SeriesPoint { year: 2005, value: 28.0 },
                SeriesPoint { year: 2010, value: 23.0 },
            ]
        );
    }

    #[test]
    fn series_treats_zero_metric_as_missing() {
        let series = country_series(&trends(), FIELDS, "Peru", "stunting_rate");
        assert!(series.iter().all(|p| p.year != 2008));
    }

    #[test]
    fn series_skips_null_metric() {
        let series = country_series(&trends(), FIELDS, "Peru", "undernourishment_rate");
        let years: Vec<i32> = series.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2005, 2008, 2010]);
    }

    #[test]
    fn series_for_unknown_country_or_metric_is_empty() {
        assert!(country_series(&trends(), FIELDS, "Chile", "stunting_rate").is_empty());
        assert!(country_series(&trends(), FIELDS, "Peru", "gdp").is_empty());
    }

    #[test]
    fn series_year_is_truncated_to_integer() {
        let ds = parse_csv("country,year,m\nX,2001.7,5").unwrap();
        let series = country_series(&ds, FIELDS, "X", "m");
        assert_eq!(series, vec![SeriesPoint { year: 2001, value: 5.0 }]);
    }

    #[test]
    fn distinct_values_are_sorted_unique_and_stable() {
        let ds = trends();
        let first = distinct_values(&ds, "country");
        assert_eq!(first, vec!["Kenya", "Peru"]);
        assert_eq!(first, distinct_values(&ds, "country"));
    }

    #[test]
    fn distinct_values_skip_nulls_and_are_case_sensitive() {
        let ds = parse_csv("c\nb\n\nB\na\nb").unwrap();
        assert_eq!(distinct_values(&ds, "c"), vec!["B", "a", "b"]);
    }
}
