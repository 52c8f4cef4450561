use std::collections::BTreeMap;

use super::error::{DashboardError, DashboardResult};
use super::widget::{Choice, Widget, WidgetValue};

/// Largest value `Snapshot::count` hands out.
const MAX_COUNT: f64 = u32::MAX as f64;

/// Immutable view of every widget value at one instant.
///
/// Recomputes read their inputs exclusively through a snapshot, so a
/// recompute never observes a half-applied change batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    values: BTreeMap<String, WidgetValue>,
}

impl Snapshot {
    pub fn from_widgets(widgets: &[Widget]) -> Self {
        Self {
            values: widgets
                .iter()
                .map(|w| (w.name.clone(), w.value))
                .collect(),
        }
    }

    pub fn with(mut self, name: &str, value: WidgetValue) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> DashboardResult<WidgetValue> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| DashboardError::UnknownWidget(name.to_string()))
    }

    pub fn number(&self, name: &str) -> DashboardResult<f64> {
        match self.get(name)? {
            WidgetValue::Number(v) => Ok(v),
            other => Err(mismatch(name, "number", &other)),
        }
    }

    /// Integer-stepped slider value, rounded to the nearest non-negative count.
    pub fn count(&self, name: &str) -> DashboardResult<usize> {
        let value = self.number(name)?.round();
        if !value.is_finite() || value > MAX_COUNT {
            return Err(DashboardError::OutOfRange {
                name: name.to_string(),
                value,
                start: 0.0,
                end: MAX_COUNT,
            });
        }
        Ok(value.max(0.0) as usize)
    }

    pub fn index(&self, name: &str) -> DashboardResult<usize> {
        match self.get(name)? {
            WidgetValue::Index(i) => Ok(i),
            other => Err(mismatch(name, "index", &other)),
        }
    }

    pub fn flag(&self, name: &str) -> DashboardResult<bool> {
        match self.get(name)? {
            WidgetValue::Flag(b) => Ok(b),
            other => Err(mismatch(name, "flag", &other)),
        }
    }

    pub fn range(&self, name: &str) -> DashboardResult<(f64, f64)> {
        match self.get(name)? {
            WidgetValue::Range(lo, hi) => Ok((lo, hi)),
            other => Err(mismatch(name, "range", &other)),
        }
    }

    pub fn choice<C: Choice>(&self, name: &str) -> DashboardResult<C> {
        let index = self.index(name)?;
        C::from_index(index).ok_or_else(|| DashboardError::ChoiceOutOfRange {
            name: name.to_string(),
            index,
            len: C::ALL.len(),
        })
    }
}

fn mismatch(name: &str, expected: &'static str, found: &WidgetValue) -> DashboardError {
    DashboardError::KindMismatch {
        name: name.to_string(),
        expected,
        found: found.kind_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_reject_wrong_kind() {
        let snapshot = Snapshot::default()
            .with("order", WidgetValue::Number(3.4))
            .with("advanced", WidgetValue::Flag(true));

        assert_eq!(snapshot.count("order").unwrap(), 3);
        assert!(snapshot.flag("advanced").unwrap());
        let err = snapshot.flag("order").unwrap_err();
        assert!(matches!(err, DashboardError::KindMismatch { expected: "flag", .. }));
    }

    #[test]
    fn count_refuses_unbounded_values() {
        let snapshot = Snapshot::default()
            .with("elements", WidgetValue::Number(f64::INFINITY))
            .with("terms", WidgetValue::Number(f64::NAN))
            .with("boxes", WidgetValue::Number(-2.0));

        assert!(matches!(
            snapshot.count("elements"),
            Err(DashboardError::OutOfRange { .. })
        ));
        assert!(matches!(
            snapshot.count("terms"),
            Err(DashboardError::OutOfRange { .. })
        ));
        assert_eq!(snapshot.count("boxes").unwrap(), 0);
    }

    #[test]
    fn missing_widget_is_reported_by_name() {
        let err = Snapshot::default().number("speed").unwrap_err();
        assert_eq!(err, DashboardError::UnknownWidget("speed".to_string()));
    }
}
