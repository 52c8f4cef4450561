use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::animation::AnimationEvent;
use super::error::{DashboardError, DashboardResult};
use super::widget::Widget;

/// One named column of a data sink entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Column {
    Values(Vec<f64>),
    Polylines(Vec<Vec<f64>>),
    Labels(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Values(v) => v.len(),
            Column::Polylines(v) => v.len(),
            Column::Labels(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Values(values)
    }
}

impl From<Vec<Vec<f64>>> for Column {
    fn from(lines: Vec<Vec<f64>>) -> Self {
        Column::Polylines(lines)
    }
}

impl From<Vec<String>> for Column {
    fn from(labels: Vec<String>) -> Self {
        Column::Labels(labels)
    }
}

/// Named columns that must all have the same number of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnData {
    columns: BTreeMap<String, Column>,
}

impl ColumnData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xy(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self::new().with("x", x).with("y", y)
    }

    /// Several polylines sharing one renderer, stored as `xs` / `ys`.
    pub fn lines(xs: Vec<Vec<f64>>, ys: Vec<Vec<f64>>) -> Self {
        Self::new().with("xs", xs).with("ys", ys)
    }

    pub fn with(mut self, name: &str, column: impl Into<Column>) -> Self {
        self.columns.insert(name.to_string(), column.into());
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn values(&self, name: &str) -> Option<&[f64]> {
        match self.columns.get(name) {
            Some(Column::Values(v)) => Some(v),
            _ => None,
        }
    }

    pub fn polylines(&self, name: &str) -> Option<&[Vec<f64>]> {
        match self.columns.get(name) {
            Some(Column::Polylines(v)) => Some(v),
            _ => None,
        }
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Row count shared by every column, zero when there are no columns.
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self, sink: &str) -> DashboardResult<()> {
        let mut iter = self.columns.iter();
        let Some((_, first)) = iter.next() else {
            return Ok(());
        };
        let expected = first.len();
        for (name, column) in iter {
            if column.len() != expected {
                return Err(DashboardError::ShapeMismatch {
                    sink: sink.to_string(),
                    column: name.clone(),
                    expected,
                    found: column.len(),
                });
            }
        }
        self.validate_polylines(sink)
    }

    /// Polyline columns of one entry describe the same curves, so the
    /// `i`-th polyline has the same number of points in each of them.
    fn validate_polylines(&self, sink: &str) -> DashboardResult<()> {
        let mut polylines = self.columns.values().filter_map(|column| match column {
            Column::Polylines(lines) => Some(lines),
            _ => None,
        });
        let Some(reference) = polylines.next() else {
            return Ok(());
        };
        for (name, column) in &self.columns {
            let Column::Polylines(lines) = column else {
                continue;
            };
            for (row, (line, expected)) in lines.iter().zip(reference).enumerate() {
                if line.len() != expected.len() {
                    return Err(DashboardError::RaggedPolyline {
                        sink: sink.to_string(),
                        column: name.clone(),
                        row,
                        expected: expected.len(),
                        found: line.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// The output of one recompute: whole sink entries and text boxes to replace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    entries: Vec<(String, ColumnData)>,
    texts: Vec<(String, String)>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(mut self, key: &str, data: ColumnData) -> Self {
        self.entries.push((key.to_string(), data));
        self
    }

    pub fn text(mut self, key: &str, text: impl Into<String>) -> Self {
        self.texts.push((key.to_string(), text.into()));
        self
    }

    pub fn entry(&self, key: &str) -> Option<&ColumnData> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, d)| d)
    }

    pub fn text_of(&self, key: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, t)| t.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ColumnData)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub(crate) fn validate(&self) -> DashboardResult<()> {
        for (key, data) in &self.entries {
            data.validate(key)?;
        }
        Ok(())
    }

    pub(crate) fn into_parts(self) -> (Vec<(String, ColumnData)>, Vec<(String, String)>) {
        (self.entries, self.texts)
    }
}

/// Keyed store read by the renderer.
///
/// Entries are only ever replaced whole, so a reader sees either the
/// previous columns or the new ones, never a mix of both.
#[derive(Debug, Default)]
pub struct DataSink {
    entries: BTreeMap<String, ColumnData>,
    texts: BTreeMap<String, String>,
}

impl DataSink {
    pub fn replace(&mut self, key: &str, data: ColumnData) -> DashboardResult<()> {
        data.validate(key)?;
        self.entries.insert(key.to_string(), data);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ColumnData> {
        self.entries.get(key)
    }

    pub fn set_text(&mut self, key: &str, text: String) {
        self.texts.insert(key.to_string(), text);
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.texts.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Everything the renderer has to redraw after one change batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    pub sinks: BTreeMap<String, ColumnData>,
    pub texts: BTreeMap<String, String>,
    pub widgets: Vec<Widget>,
    pub recomputes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationEvent>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
            && self.texts.is_empty()
            && self.widgets.is_empty()
            && self.animation.is_none()
    }

    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_rejects_ragged_columns() {
        let mut sink = DataSink::default();
        let data = ColumnData::xy(vec![0.0, 1.0], vec![0.0]);
        let err = sink.replace("curve", data).unwrap_err();
        assert_eq!(
            err,
            DashboardError::ShapeMismatch {
                sink: "curve".to_string(),
                column: "y".to_string(),
                expected: 2,
                found: 1,
            }
        );
        assert!(sink.get("curve").is_none());
    }

    #[test]
    fn replace_rejects_polylines_of_unequal_length() {
        let mut sink = DataSink::default();
        let data = ColumnData::lines(
            vec![vec![0.0, 1.0], vec![2.0, 3.0]],
            vec![vec![0.0, 1.0], vec![2.0]],
        );
        let err = sink.replace("segments", data).unwrap_err();
        assert_eq!(
            err,
            DashboardError::RaggedPolyline {
                sink: "segments".to_string(),
                column: "ys".to_string(),
                row: 1,
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn replace_swaps_the_whole_entry() {
        let mut sink = DataSink::default();
        sink.replace("curve", ColumnData::xy(vec![0.0; 3], vec![1.0; 3]))
            .unwrap();
        sink.replace("curve", ColumnData::xy(vec![2.0], vec![4.0]))
            .unwrap();

        let entry = sink.get("curve").unwrap();
        assert_eq!(entry.len(), 1);
        assert_eq!(entry.values("y"), Some(&[4.0][..]));
    }

    #[test]
    fn column_data_serializes_as_plain_object() {
        let data = ColumnData::new()
            .with("x", vec![1.0])
            .with("color", vec!["red".to_string()]);
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"color":["red"],"x":[1.0]}"#);
    }
}
