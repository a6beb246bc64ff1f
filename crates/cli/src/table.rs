//! Plain-text tables.

use crate::output::{format_coordinate, format_distance};
use console::{measure_text_width, pad_str, Alignment};
use geocatalog_geo::{DistanceRecord, LocationDocument};

/// A left-aligned text table with a header row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given column headers
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty, extra cells are dropped.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render with two spaces between columns and a dashed rule under the header
    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| measure_text_width(&row[i]))
                    .chain(std::iter::once(measure_text_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, None).into_owned())
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut out = vec![line(&self.headers), line(&rule)];
        out.extend(self.rows.iter().map(|row| line(row)));
        out.join("\n")
    }
}

/// Table of stored locations. Unparsable coordinates show as `?`.
pub fn locations_table(documents: &[LocationDocument]) -> Table {
    let mut table = Table::new(["Name", "City", "UF", "Coordinates", "Description"]);
    for doc in documents {
        let coordinates = doc
            .coordinate()
            .map(|c| format_coordinate(c.latitude, c.longitude))
            .unwrap_or_else(|_| "?".to_string());
        table.push_row([
            doc.name.clone(),
            doc.city.clone(),
            doc.state.clone(),
            coordinates,
            doc.description.clone(),
        ]);
    }
    table
}

/// Table of radius search results, nearest first.
pub fn distance_table(records: &[DistanceRecord]) -> Table {
    let mut table = Table::new(["#", "Name", "Distance", "Coordinates", "Description"]);
    for (rank, record) in records.iter().enumerate() {
        let entity = &record.entity;
        table.push_row([
            (rank + 1).to_string(),
            entity.name.clone(),
            format_distance(record.distance_km),
            format_coordinate(entity.coordinate.latitude, entity.coordinate.longitude),
            entity.description.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocatalog_geo::{filter_by_radius, Coordinate};

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new(["UF", "Name"]);
        table.push_row(["PE", "Pernambuco"]);
        table.push_row(["SP", "São Paulo"]);

        let rendered = table.render();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "UF  Name");
        assert_eq!(lines[1], "--  ----------");
        assert_eq!(lines[2], "PE  Pernambuco");
        assert_eq!(lines[3], "SP  São Paulo");
    }

    #[test]
    fn test_short_rows_padded() {
        let mut table = Table::new(["a", "b", "c"]);
        table.push_row(["1"]);
        assert_eq!(table.len(), 1);
        assert!(table.render().ends_with('1'));
    }

    #[test]
    fn test_locations_table_marks_bad_coordinates() {
        let mut bad = LocationDocument::new("Bad", "Recife", "PE", Coordinate::new(0.0, 0.0), "");
        bad.coordinates = serde_json::Value::Null;
        let table = locations_table(&[bad]);

        assert!(table.render().lines().nth(2).unwrap().contains('?'));
    }

    #[test]
    fn test_distance_table_ranks() {
        let docs = vec![
            LocationDocument::new("Far", "X", "XX", Coordinate::new(0.0, 0.5), ""),
            LocationDocument::new("Near", "X", "XX", Coordinate::new(0.0, 0.001), ""),
        ];
        let table = distance_table(&filter_by_radius(&docs, 0.0, 0.0, 100.0));
        let rendered = table.render();
        let lines: Vec<_> = rendered.lines().collect();

        assert!(lines[2].starts_with("1  Near"));
        assert!(lines[3].starts_with("2  Far"));
    }
}
