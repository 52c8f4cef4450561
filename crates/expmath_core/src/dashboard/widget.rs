use serde::{Deserialize, Serialize};

/// The value a widget currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum WidgetValue {
    Number(f64),
    Index(usize),
    Flag(bool),
    Range(f64, f64),
}

impl WidgetValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            WidgetValue::Number(_) => "number",
            WidgetValue::Index(_) => "index",
            WidgetValue::Flag(_) => "flag",
            WidgetValue::Range(_, _) => "range",
        }
    }

    pub(crate) fn same_kind(&self, other: &WidgetValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Slider,
    RangeSlider,
    Toggle,
    ButtonGroup,
    Dropdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Bounds {
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }
}

/// A closed set of options selected by a button group or dropdown.
///
/// `ALL` fixes the order in which the options are presented; the widget
/// stores the position of the active option in that list.
pub trait Choice: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn labels() -> Vec<String> {
        Self::ALL.iter().map(|c| c.label().to_string()).collect()
    }
}

/// A user-facing control with its display properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub name: String,
    pub title: String,
    pub kind: WidgetKind,
    pub value: WidgetValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub visible: bool,
}

impl Widget {
    pub fn slider(name: &str, title: &str, start: f64, end: f64, step: f64, value: f64) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            kind: WidgetKind::Slider,
            value: WidgetValue::Number(value),
            bounds: Some(Bounds::new(start, end, step)),
            labels: Vec::new(),
            visible: true,
        }
    }

    pub fn range_slider(
        name: &str,
        title: &str,
        start: f64,
        end: f64,
        step: f64,
        value: (f64, f64),
    ) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            kind: WidgetKind::RangeSlider,
            value: WidgetValue::Range(value.0, value.1),
            bounds: Some(Bounds::new(start, end, step)),
            labels: Vec::new(),
            visible: true,
        }
    }

    pub fn toggle(name: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            kind: WidgetKind::Toggle,
            value: WidgetValue::Flag(false),
            bounds: None,
            labels: Vec::new(),
            visible: true,
        }
    }

    pub fn buttons<C: Choice>(name: &str, active: C) -> Self {
        Self::choice(name, "", WidgetKind::ButtonGroup, active)
    }

    pub fn dropdown<C: Choice>(name: &str, title: &str, active: C) -> Self {
        Self::choice(name, title, WidgetKind::Dropdown, active)
    }

    fn choice<C: Choice>(name: &str, title: &str, kind: WidgetKind, active: C) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            kind,
            value: WidgetValue::Index(active.index()),
            bounds: None,
            labels: C::labels(),
            visible: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn choices(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Shape {
        Bell,
        Hat,
    }

    impl Choice for Shape {
        const ALL: &'static [Self] = &[Shape::Bell, Shape::Hat];

        fn label(self) -> &'static str {
            match self {
                Shape::Bell => "Bell",
                Shape::Hat => "Hat",
            }
        }
    }

    #[test]
    fn button_group_stores_choice_position() {
        let widget = Widget::buttons("shape", Shape::Hat);
        assert_eq!(widget.value, WidgetValue::Index(1));
        assert_eq!(widget.labels, vec!["Bell".to_string(), "Hat".to_string()]);
        assert_eq!(widget.kind, WidgetKind::ButtonGroup);
    }

    #[test]
    fn hidden_builder_clears_visibility() {
        let widget = Widget::slider("a", "a", -2.0, 2.0, 0.1, 1.0).hidden();
        assert!(!widget.visible);
        assert_eq!(widget.bounds, Some(Bounds::new(-2.0, 2.0, 0.1)));
    }

    #[test]
    fn widget_value_serializes_with_tag() {
        let json = serde_json::to_string(&WidgetValue::Range(1.0, 3.0)).expect("json");
        assert_eq!(json, r#"{"type":"range","value":[1.0,3.0]}"#);
        let back: WidgetValue = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, WidgetValue::Range(1.0, 3.0));
    }
}
