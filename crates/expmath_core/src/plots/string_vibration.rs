//! Standing waves of a string fixed at both ends, superposed from its first
//! three eigenmodes.

use std::f64::consts::PI;

use crate::dashboard::{
    AnimationSpec, Binding, ColumnData, DashboardResult, Snapshot, Update, Visualization, Widget,
};
use crate::sampling::{linspace, map};

const LENGTH: &str = "length";
const TENSION: &str = "tension";
const DENSITY: &str = "density";
const MODES: [&str; 3] = ["first", "second", "third"];
const ANIMATE: &str = "animate";
const TIME: &str = "time";

const SAMPLES: usize = 100;
/// Slows the animation clock down to a watchable frequency.
const TIME_SCALE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VibratingString {
    /// Length in multiples of pi.
    pub length: f64,
    pub tension: f64,
    pub density: f64,
    pub modes: [f64; 3],
}

impl VibratingString {
    fn from_snapshot(snapshot: &Snapshot) -> DashboardResult<Self> {
        Ok(Self {
            length: snapshot.number(LENGTH)?,
            tension: snapshot.number(TENSION)?,
            density: snapshot.number(DENSITY)?,
            modes: [
                snapshot.number(MODES[0])?,
                snapshot.number(MODES[1])?,
                snapshot.number(MODES[2])?,
            ],
        })
    }

    fn wave_speed(&self) -> f64 {
        (self.tension / self.density).sqrt()
    }

    pub fn displacement(&self, x: f64, t: f64) -> f64 {
        let c = self.wave_speed();
        self.modes
            .iter()
            .enumerate()
            .map(|(i, amplitude)| {
                let k = (i + 1) as f64 / self.length;
                amplitude * (k * c * t * TIME_SCALE).cos() * (k * x).sin()
            })
            .sum()
    }

    /// Superposition of the active modes, e.g.
    /// `u(t,x) = 1.0 \cdot \cos(...) \cdot \sin(...)`.
    pub fn latex(&self) -> String {
        let terms: Vec<String> = self
            .modes
            .iter()
            .enumerate()
            .filter(|(_, amplitude)| **amplitude != 0.0)
            .map(|(i, amplitude)| {
                let n = i + 1;
                format!(
                    "{amplitude:.1} \\cdot \\cos \\left( \\frac{{{n}}}{{{l:.1}}} \\sqrt{{\\frac{{{s:.1}}}{{{d:.1}}}}} t \\right) \\cdot \\sin \\left( \\frac{{{n}}}{{{l:.1}}} x \\right)",
                    l = self.length,
                    s = self.tension,
                    d = self.density,
                )
            })
            .collect();
        if terms.is_empty() {
            "u(t,x) = 0".to_string()
        } else {
            format!("u(t,x) = {}", terms.join(" + "))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Displacement,
    Formula,
}

#[derive(Debug, Clone, Default)]
pub struct StringVibration;

impl Visualization for StringVibration {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::slider(LENGTH, "Length of the string (times pi)", 0.5, 2.0, 0.5, 1.0),
            Widget::slider(TENSION, "Tension", 0.1, 2.0, 0.1, 1.0),
            Widget::slider(DENSITY, "Linear density", 0.1, 2.0, 0.1, 1.0),
            Widget::slider(MODES[0], "First eigenmode", 0.0, 2.0, 0.1, 1.0),
            Widget::slider(MODES[1], "Second eigenmode", 0.0, 2.0, 0.1, 0.0),
            Widget::slider(MODES[2], "Third eigenmode", 0.0, 2.0, 0.1, 0.0),
            Widget::toggle(ANIMATE, "Animate"),
            Widget::slider(TIME, "Time", 0.0, 100.0, 1.0, 0.0),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        let parameters = [LENGTH, TENSION, DENSITY, "first", "second", "third"];
        let mut with_time = parameters.to_vec();
        with_time.push(TIME);
        vec![
            Binding::new(Recompute::Displacement, &with_time),
            Binding::new(Recompute::Formula, &parameters),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let string = VibratingString::from_snapshot(snapshot)?;
        match which {
            Recompute::Displacement => {
                let t = snapshot.number(TIME)?;
                let x = linspace(0.0, string.length * PI, SAMPLES);
                let y = map(&x, |x| string.displacement(x, t));
                Ok(Update::new().sink("string", ColumnData::xy(x, y)))
            }
            Recompute::Formula => Ok(Update::new().text("solution", string.latex())),
        }
    }

    fn animation(&self) -> Option<AnimationSpec> {
        Some(AnimationSpec {
            toggle: ANIMATE,
            target: TIME,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    fn string() -> VibratingString {
        VibratingString {
            length: 1.5,
            tension: 1.2,
            density: 0.8,
            modes: [1.0, 0.5, 0.0],
        }
    }

    #[test]
    fn ends_stay_fixed() {
        let s = string();
        for &t in &[0.0, 13.0, 57.0] {
            assert_eq!(s.displacement(0.0, t), 0.0);
            assert!(s.displacement(s.length * PI, t).abs() < 1e-12);
        }
    }

    #[test]
    fn displacement_solves_the_scaled_wave_equation() {
        let s = string();
        let c = s.wave_speed() * TIME_SCALE;
        let (x, t, h) = (1.1, 7.0, 1e-3);
        let u_tt = (s.displacement(x, t + h) - 2.0 * s.displacement(x, t) + s.displacement(x, t - h))
            / (h * h);
        let u_xx = (s.displacement(x + h, t) - 2.0 * s.displacement(x, t) + s.displacement(x - h, t))
            / (h * h);
        assert!((u_tt - c * c * u_xx).abs() < 1e-5);
    }

    #[test]
    fn formula_lists_only_active_modes() {
        let latex = string().latex();
        assert!(latex.starts_with("u(t,x) = 1.0 \\cdot"));
        assert_eq!(latex.matches("\\cos").count(), 2);
        assert!(latex.contains("\\frac{2}{1.5}"));

        let silent = VibratingString {
            modes: [0.0; 3],
            ..string()
        };
        assert_eq!(silent.latex(), "u(t,x) = 0");
    }

    #[test]
    fn time_changes_skip_the_formula() {
        let mut dashboard =
            Dashboard::new(StringVibration, DashboardSettings::default()).unwrap();
        let frame = dashboard.populate().unwrap();
        assert!(frame.texts.contains_key("solution"));
        let frame = dashboard.set_number(TIME, 20.0).unwrap();
        assert_eq!(frame.recomputes, 1);
        assert!(frame.texts.is_empty());
    }
}
