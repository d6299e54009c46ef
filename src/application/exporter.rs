// Tabular export of aligned chart series
use crate::domain::align::AlignedSeries;

/// Re-flatten an aligned series into a row-oriented table: a header row
/// `[period_column, ...column_labels]` followed by one row per period.
/// Numeric cells use fixed two-decimal precision; unaligned positions are
/// empty text, so the exported table matches what is drawn on screen
/// row-for-row. Pure function of the series value only.
pub fn to_rows(
    series: &AlignedSeries,
    period_column: &str,
    column_labels: &[String],
) -> Vec<Vec<String>> {
    let tracks = [
        &series.historical,
        &series.forecast,
        &series.lower,
        &series.upper,
    ];

    let mut header = Vec::with_capacity(column_labels.len() + 1);
    header.push(period_column.to_string());
    header.extend(column_labels.iter().cloned());

    let mut rows = Vec::with_capacity(series.len() + 1);
    rows.push(header);

    for (i, period) in series.labels.iter().enumerate() {
        let mut row = Vec::with_capacity(column_labels.len() + 1);
        row.push(period.label());
        for (track, _) in tracks.iter().zip(column_labels) {
            row.push(match track[i] {
                Some(value) => format!("{value:.2}"),
                None => String::new(),
            });
        }
        rows.push(row);
    }

    rows
}

/// Serialize rows as UTF-8 CSV, quoting fields that need it.
pub fn to_csv(rows: &[Vec<String>]) -> String {
    let mut csv = String::new();
    for row in rows {
        let line = row
            .iter()
            .map(|field| escape_csv(field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }
    csv
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::align::align;
    use crate::domain::period::Period;
    use crate::domain::series::{ForecastPoint, TimePoint};

    fn columns() -> Vec<String> {
        ["Histórico", "Previsão", "Limite inferior", "Limite superior"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn sample_series() -> AlignedSeries {
        let historical = vec![
            TimePoint::new(Period::Year(2020), 10.0),
            TimePoint::new(Period::Year(2021), 20.0),
        ];
        let forecast = vec![ForecastPoint::new(Period::Year(2022), 25.5, 20.25, 30.0)];
        align(&historical, &forecast).unwrap()
    }

    #[test]
    fn test_header_and_row_counts() {
        let series = sample_series();
        let rows = to_rows(&series, "Periodo", &columns());

        assert_eq!(rows[0].len(), 1 + columns().len());
        assert_eq!(rows.len(), 1 + series.len());
        assert_eq!(rows[0][0], "Periodo");
    }

    #[test]
    fn test_cells_match_alignment() {
        let rows = to_rows(&sample_series(), "Periodo", &columns());

        // Forecast-family columns are blank for historical rows except the
        // last one, where they repeat the last historical value.
        assert_eq!(rows[1], vec!["2020", "10.00", "", "", ""]);
        assert_eq!(rows[2], vec!["2021", "20.00", "20.00", "20.00", "20.00"]);
        assert_eq!(rows[3], vec!["2022", "", "25.50", "20.25", "30.00"]);
    }

    #[test]
    fn test_fewer_column_labels_truncate_tracks() {
        let labels = vec!["Histórico".to_string(), "Previsão".to_string()];
        let rows = to_rows(&sample_series(), "Periodo", &labels);

        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[3], vec!["2022", "", "25.50"]);
    }

    #[test]
    fn test_csv_output() {
        let rows = to_rows(&sample_series(), "Periodo", &columns());
        let csv = to_csv(&rows);
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Periodo,Histórico,Previsão,Limite inferior,Limite superior"
        );
        assert_eq!(lines.next().unwrap(), "2020,10.00,,,");
        assert_eq!(lines.next().unwrap(), "2021,20.00,20.00,20.00,20.00");
        assert_eq!(lines.next().unwrap(), "2022,,25.50,20.25,30.00");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_escaping() {
        let rows = vec![vec![
            "plain".to_string(),
            "with,comma".to_string(),
            "with \"quote\"".to_string(),
        ]];
        assert_eq!(
            to_csv(&rows),
            "plain,\"with,comma\",\"with \"\"quote\"\"\"\n"
        );
    }
}
