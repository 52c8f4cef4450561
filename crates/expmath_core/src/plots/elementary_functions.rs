//! Parametrised elementary function families, with an optional second
//! function whose parameters are swapped in and out through a history.

use crate::dashboard::{
    Binding, Change, Choice, ColumnData, Controls, DashboardResult, History, Origin, Snapshot,
    Update, Visualization, Widget,
};
use crate::sampling::{linspace, map};

const FUNCTION: &str = "function";
const PARAMETERS: [&str; 4] = ["a", "b", "c", "d"];
const SECOND: &str = "second";

const SAMPLES: usize = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Constant,
    Linear,
    Quadratic,
    Cubic,
    Sine,
    Cosine,
    Tangent,
    GeneralExponential,
    Exponential,
    Root,
    Logarithm,
    HyperbolicSine,
    HyperbolicCosine,
    HyperbolicTangent,
    ArcSine,
    ArcCosine,
    ArcTangent,
    AreaHyperbolicSine,
    AreaHyperbolicCosine,
    AreaHyperbolicTangent,
    Absolute,
    Heaviside,
}

impl Choice for Family {
    const ALL: &'static [Self] = &[
        Family::Constant,
        Family::Linear,
        Family::Quadratic,
        Family::Cubic,
        Family::Sine,
        Family::Cosine,
        Family::Tangent,
        Family::GeneralExponential,
        Family::Exponential,
        Family::Root,
        Family::Logarithm,
        Family::HyperbolicSine,
        Family::HyperbolicCosine,
        Family::HyperbolicTangent,
        Family::ArcSine,
        Family::ArcCosine,
        Family::ArcTangent,
        Family::AreaHyperbolicSine,
        Family::AreaHyperbolicCosine,
        Family::AreaHyperbolicTangent,
        Family::Absolute,
        Family::Heaviside,
    ];

    fn label(self) -> &'static str {
        match self {
            Family::Constant => "Constant",
            Family::Linear => "Linear",
            Family::Quadratic => "Quadratic",
            Family::Cubic => "Cubic",
            Family::Sine => "Sine",
            Family::Cosine => "Cosine",
            Family::Tangent => "Tangent",
            Family::GeneralExponential => "Exponential (general base)",
            Family::Exponential => "Exponential (base e)",
            Family::Root => "Root",
            Family::Logarithm => "Natural logarithm",
            Family::HyperbolicSine => "Hyperbolic sine",
            Family::HyperbolicCosine => "Hyperbolic cosine",
            Family::HyperbolicTangent => "Hyperbolic tangent",
            Family::ArcSine => "Arc sine",
            Family::ArcCosine => "Arc cosine",
            Family::ArcTangent => "Arc tangent",
            Family::AreaHyperbolicSine => "Area hyperbolic sine",
            Family::AreaHyperbolicCosine => "Area hyperbolic cosine",
            Family::AreaHyperbolicTangent => "Area hyperbolic tangent",
            Family::Absolute => "Absolute value",
            Family::Heaviside => "Heaviside step",
        }
    }
}

impl Family {
    /// Parameter values a freshly selected family starts from.
    pub fn defaults(self) -> [f64; 4] {
        match self {
            Family::Constant | Family::Cubic | Family::Heaviside => [1.0, 0.0, 0.0, 0.0],
            Family::Quadratic => [1.0, 0.0, -1.0, 0.0],
            Family::GeneralExponential | Family::Root => [1.0, 2.0, 0.0, 0.0],
            _ => [1.0, 1.0, 0.0, 0.0],
        }
    }

    pub fn eval(self, [a, b, c, d]: [f64; 4], x: f64) -> f64 {
        match self {
            Family::Constant => a,
            Family::Linear => a * x + b,
            Family::Quadratic => a * x * x + b * x + c,
            Family::Cubic => a * x.powi(3) + b * x * x + c * x + d,
            Family::Sine => a * (b * x + c).sin() + d,
            Family::Cosine => a * (b * x + c).cos() + d,
            Family::Tangent => a * (b * x + c).tan() + d,
            Family::GeneralExponential => a * b.powf(x + c) + d,
            Family::Exponential => a * (b * (x + c)).exp() + d,
            Family::Root => a * (x + c).powf(1.0 / b) + d,
            Family::Logarithm => a * (b * (x + c)).ln() + d,
            Family::HyperbolicSine => a * (b * x + c).sinh() + d,
            Family::HyperbolicCosine => a * (b * x + c).cosh() + d,
            Family::HyperbolicTangent => a * (b * x + c).tanh() + d,
            Family::ArcSine => a * (b * x + c).asin() + d,
            Family::ArcCosine => a * (b * x + c).acos() + d,
            Family::ArcTangent => a * (b * x + c).atan() + d,
            Family::AreaHyperbolicSine => a * (b * x + c).asinh() + d,
            Family::AreaHyperbolicCosine => a * (b * x + c).acosh() + d,
            Family::AreaHyperbolicTangent => a * (b * x + c).atanh() + d,
            Family::Absolute => a * (b * x + c).abs() + d,
            Family::Heaviside => {
                if x >= b {
                    a + c
                } else {
                    c
                }
            }
        }
    }

    /// LaTeX form with the generic formula followed by the current values.
    pub fn latex(self, [a, b, c, d]: [f64; 4]) -> String {
        match self {
            Family::Constant => format!("f(x) = a = {a:.2}"),
            Family::Linear => format!("f(x) = ax + b = {a:.2}x + {b:.2}"),
            Family::Quadratic => {
                format!("f(x) = ax^2 + bx + c = {a:.2}x^2 + {b:.2}x + {c:.2}")
            }
            Family::Cubic => format!(
                "f(x) = ax^3 + bx^2 + cx + d = {a:.2}x^3 + {b:.2}x^2 + {c:.2}x + {d:.2}"
            ),
            Family::GeneralExponential => {
                format!("f(x) = a \\cdot b^{{x + c}} + d = {a:.2} \\cdot {b:.2}^{{x + {c:.2}}} + {d:.2}")
            }
            Family::Exponential => format!(
                "f(x) = a e^{{b(x + c)}} + d = {a:.2} e^{{{b:.2}(x + {c:.2})}} + {d:.2}"
            ),
            Family::Root => format!(
                "f(x) = a \\sqrt[b]{{x + c}} + d = {a:.2} \\sqrt[{b:.2}]{{x + {c:.2}}} + {d:.2}"
            ),
            Family::Logarithm => format!(
                "f(x) = a \\ln(b(x + c)) + d = {a:.2} \\ln({b:.2}(x + {c:.2})) + {d:.2}"
            ),
            Family::Absolute => {
                format!("f(x) = a|bx + c| + d = {a:.2}|{b:.2}x + {c:.2}| + {d:.2}")
            }
            Family::Heaviside => format!(
                "f(x) = a H(x - b) + c = {a:.2} H(x - {b:.2}) + {c:.2}"
            ),
            _ => {
                let name = self.operator();
                format!(
                    "f(x) = a \\{name}(bx + c) + d = {a:.2} \\{name}({b:.2}x + {c:.2}) + {d:.2}"
                )
            }
        }
    }

    fn operator(self) -> &'static str {
        match self {
            Family::Sine => "sin",
            Family::Cosine => "cos",
            Family::Tangent => "tan",
            Family::HyperbolicSine => "sinh",
            Family::HyperbolicCosine => "cosh",
            Family::HyperbolicTangent => "tanh",
            Family::ArcSine => "arcsin",
            Family::ArcCosine => "arccos",
            Family::ArcTangent => "arctan",
            Family::AreaHyperbolicSine => "operatorname{arsinh}",
            Family::AreaHyperbolicCosine => "operatorname{arcosh}",
            Family::AreaHyperbolicTangent => "operatorname{artanh}",
            _ => "",
        }
    }
}

/// A family together with its four parameter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub family: Family,
    pub values: [f64; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Active,
}

#[derive(Debug, Clone)]
pub struct ElementaryFunctions {
    history: History<Parameters>,
}

impl Default for ElementaryFunctions {
    fn default() -> Self {
        Self {
            history: History::seeded(
                2,
                Parameters {
                    family: Family::Constant,
                    values: [2.0, 0.0, 0.0, 0.0],
                },
            ),
        }
    }
}

impl ElementaryFunctions {
    pub fn history(&self) -> &History<Parameters> {
        &self.history
    }
}

fn read_parameters(snapshot: &Snapshot) -> DashboardResult<Parameters> {
    let mut values = [0.0; 4];
    for (slot, name) in values.iter_mut().zip(PARAMETERS) {
        *slot = snapshot.number(name)?;
    }
    Ok(Parameters {
        family: snapshot.choice(FUNCTION)?,
        values,
    })
}

fn write_values(controls: &mut Controls<'_>, values: [f64; 4]) -> DashboardResult<()> {
    for (name, value) in PARAMETERS.into_iter().zip(values) {
        controls.set_number(name, value)?;
    }
    Ok(())
}

impl Visualization for ElementaryFunctions {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        let mut widgets = vec![Widget::dropdown(FUNCTION, "Function family", Family::Constant)];
        widgets.extend(
            PARAMETERS
                .iter()
                .map(|name| Widget::slider(name, name, -2.0, 2.0, 0.1, 1.0)),
        );
        widgets.push(Widget::toggle(SECOND, "Toggle second function g"));
        widgets
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![Binding::new(
            Recompute::Active,
            &[FUNCTION, "a", "b", "c", "d", SECOND],
        )]
    }

    fn recompute(&self, _which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let parameters = read_parameters(snapshot)?;
        let x = linspace(-10.0, 10.0, SAMPLES);
        let y = map(&x, |x| parameters.family.eval(parameters.values, x));
        let latex = parameters.family.latex(parameters.values);

        Ok(if snapshot.flag(SECOND)? {
            Update::new()
                .sink("g", ColumnData::xy(x, y))
                .text("g_label", latex.replace("f(x)", "g(x)"))
        } else {
            Update::new()
                .sink("f", ColumnData::xy(x, y))
                .text("f_label", latex)
        })
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if change.is(FUNCTION) && change.origin == Origin::User {
            let family: Family = controls.choice(FUNCTION)?;
            write_values(controls, family.defaults())?;
        } else if change.is(SECOND) {
            let current = read_parameters(&controls.snapshot())?;
            if let Some(previous) = self.history.exchange(current) {
                controls.set_choice(FUNCTION, previous.family)?;
                write_values(controls, previous.values)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    fn dashboard() -> Dashboard<ElementaryFunctions> {
        let mut dashboard =
            Dashboard::new(ElementaryFunctions::default(), DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        dashboard
    }

    #[test]
    fn constant_family_is_flat() {
        let mut dashboard = dashboard();
        let frame = dashboard.set_number("a", 2.0).unwrap();
        let f = frame.sinks.get("f").expect("f sink");
        let y = f.values("y").unwrap();
        assert_eq!(y.len(), 400);
        assert!(y.iter().all(|&v| v == 2.0));
        assert_eq!(frame.texts.get("f_label").unwrap(), "f(x) = a = 2.00");
    }

    #[test]
    fn picking_a_family_resets_its_parameters() {
        let mut dashboard = dashboard();
        let frame = dashboard.set_choice(FUNCTION, Family::Quadratic).unwrap();
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.number("a").unwrap(), 1.0);
        assert_eq!(snapshot.number("b").unwrap(), 0.0);
        assert_eq!(snapshot.number("c").unwrap(), -1.0);
        assert_eq!(frame.recomputes, 1);

        let y = frame.sinks["f"].values("y").unwrap();
        let x = frame.sinks["f"].values("x").unwrap();
        assert!((y[0] - (x[0] * x[0] - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn second_function_swaps_parameters_through_history() {
        let mut dashboard = dashboard();
        dashboard.set_choice(FUNCTION, Family::Sine).unwrap();
        dashboard.set_number("d", 0.5).unwrap();

        let frame = dashboard.set_flag(SECOND, true).unwrap();
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.choice::<Family>(FUNCTION).unwrap(), Family::Constant);
        assert_eq!(snapshot.number("a").unwrap(), 2.0);
        assert_eq!(frame.recomputes, 1);
        assert!(frame.sinks.contains_key("g"));
        assert!(!frame.sinks.contains_key("f"));
        assert!(frame.texts["g_label"].starts_with("g(x)"));

        dashboard.set_flag(SECOND, false).unwrap();
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.choice::<Family>(FUNCTION).unwrap(), Family::Sine);
        assert_eq!(snapshot.number("d").unwrap(), 0.5);
        assert_eq!(dashboard.visualization().history().len(), 1);
    }

    #[test]
    fn recompute_is_deterministic() {
        let visualization = ElementaryFunctions::default();
        let snapshot = Snapshot::from_widgets(&visualization.widgets());
        let first = visualization.recompute(Recompute::Active, &snapshot).unwrap();
        let second = visualization.recompute(Recompute::Active, &snapshot).unwrap();
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }

    #[test]
    fn heaviside_steps_at_b() {
        let family = Family::Heaviside;
        assert_eq!(family.eval([1.0, 0.5, 0.25, 0.0], 0.4), 0.25);
        assert_eq!(family.eval([1.0, 0.5, 0.25, 0.0], 0.5), 1.25);
    }
}
