use thiserror::Error;

/// Failures raised while wiring or driving a dashboard.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("Unknown widget '{0}'.")]
    UnknownWidget(String),
    #[error("Duplicate widget name '{0}'.")]
    DuplicateWidget(String),
    #[error("Widget '{name}' holds a {found} value, expected {expected}.")]
    KindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Choice {index} is out of range for widget '{name}' ({len} choices).")]
    ChoiceOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },
    #[error("Value {value} of widget '{name}' lies outside [{start}, {end}].")]
    OutOfRange {
        name: String,
        value: f64,
        start: f64,
        end: f64,
    },
    #[error("Range ({lo}, {hi}) of widget '{name}' is reversed.")]
    ReversedRange { name: String, lo: f64, hi: f64 },
    #[error("Column '{column}' of sink '{sink}' has {found} rows, expected {expected}.")]
    ShapeMismatch {
        sink: String,
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("Polyline {row} of column '{column}' in sink '{sink}' has {found} points, expected {expected}.")]
    RaggedPolyline {
        sink: String,
        column: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Change batch exceeded {limit} programmatic widget changes.")]
    ReactionOverflow { limit: usize },
    #[error("Animation target '{0}' must be a bounded slider.")]
    InvalidAnimationTarget(String),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
