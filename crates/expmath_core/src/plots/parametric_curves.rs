//! Plane curves `gamma(t) = (x(t), y(t))` assembled from simple components.

use crate::dashboard::{
    Binding, Change, Choice, ColumnData, Controls, DashboardResult, Snapshot, Update,
    Visualization, Widget, WidgetValue,
};
use crate::sampling::linspace;

const X_COMPONENT: &str = "x_component";
const Y_COMPONENT: &str = "y_component";
const PARAMETERS: &str = "parameters";
const X_A: &str = "x_a";
const X_B: &str = "x_b";
const Y_C: &str = "y_c";
const Y_D: &str = "y_d";
const PARAMETER_RANGE: &str = "parameter_range";

const SAMPLES: usize = 100;
const PARAMETER_SLIDERS: [&str; 4] = [X_A, X_B, Y_C, Y_D];

/// One coordinate as a function of `t` with two parameters `p` and `q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Constant,
    Linear,
    Sine,
    Cosine,
}

impl Choice for Component {
    const ALL: &'static [Self] = &[
        Component::Constant,
        Component::Linear,
        Component::Sine,
        Component::Cosine,
    ];

    fn label(self) -> &'static str {
        match self {
            Component::Constant => "p",
            Component::Linear => "p t + q",
            Component::Sine => "p sin(q t)",
            Component::Cosine => "p cos(q t)",
        }
    }
}

impl Component {
    pub fn eval(self, p: f64, q: f64, t: f64) -> f64 {
        match self {
            Component::Constant => p,
            Component::Linear => p * t + q,
            Component::Sine => p * (q * t).sin(),
            Component::Cosine => p * (q * t).cos(),
        }
    }

    pub fn latex(self, p: f64, q: f64) -> String {
        match self {
            Component::Constant => format!("{p:.2}"),
            Component::Linear => format!("{p:.2} t + {q:.2}"),
            Component::Sine => format!("{p:.2} \\sin({q:.2} t)"),
            Component::Cosine => format!("{p:.2} \\cos({q:.2} t)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    pub x: (Component, f64, f64),
    pub y: (Component, f64, f64),
    pub range: (f64, f64),
}

impl Curve {
    pub fn point(&self, t: f64) -> (f64, f64) {
        let (fx, a, b) = self.x;
        let (fy, c, d) = self.y;
        (fx.eval(a, b, t), fy.eval(c, d, t))
    }

    pub fn sample(&self) -> (Vec<f64>, Vec<f64>) {
        linspace(self.range.0, self.range.1, SAMPLES)
            .into_iter()
            .map(|t| self.point(t))
            .unzip()
    }

    pub fn latex(&self) -> String {
        let (fx, a, b) = self.x;
        let (fy, c, d) = self.y;
        format!(
            "\\vec{{\\gamma}}(t) = \\begin{{pmatrix}} {} \\cr {} \\end{{pmatrix}}, \\quad t \\in ({:.2}, {:.2})",
            fx.latex(a, b),
            fy.latex(c, d),
            self.range.0,
            self.range.1
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Curve,
}

#[derive(Debug, Clone, Default)]
pub struct ParametricCurves;

impl Visualization for ParametricCurves {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(X_COMPONENT, Component::Cosine),
            Widget::buttons(Y_COMPONENT, Component::Sine),
            Widget::toggle(PARAMETERS, "Show the parameter sliders"),
            Widget::slider(X_A, "Parameter a of x", -2.0, 2.0, 0.1, 1.0).hidden(),
            Widget::slider(X_B, "Parameter b of x", -2.0, 2.0, 0.1, 1.0).hidden(),
            Widget::slider(Y_C, "Parameter c of y", -2.0, 2.0, 0.1, -1.0).hidden(),
            Widget::slider(Y_D, "Parameter d of y", -2.0, 2.0, 0.1, 2.0).hidden(),
            Widget::range_slider(
                PARAMETER_RANGE,
                "Range of the parameter",
                -5.0,
                5.0,
                0.1,
                (2.0, 5.0),
            ),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![Binding::new(
            Recompute::Curve,
            &[X_COMPONENT, Y_COMPONENT, X_A, X_B, Y_C, Y_D, PARAMETER_RANGE],
        )]
    }

    fn recompute(&self, _which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let curve = Curve {
            x: (
                snapshot.choice(X_COMPONENT)?,
                snapshot.number(X_A)?,
                snapshot.number(X_B)?,
            ),
            y: (
                snapshot.choice(Y_COMPONENT)?,
                snapshot.number(Y_C)?,
                snapshot.number(Y_D)?,
            ),
            range: snapshot.range(PARAMETER_RANGE)?,
        };
        let (x, y) = curve.sample();
        Ok(Update::new()
            .sink("curve", ColumnData::xy(x, y))
            .text("definition", curve.latex()))
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if change.is(PARAMETERS) && change.new == WidgetValue::Flag(true) {
            controls.set_visible(PARAMETERS, false)?;
            for name in PARAMETER_SLIDERS {
                controls.set_visible(name, true)?;
            }
        }
        Ok(())
    }
}
