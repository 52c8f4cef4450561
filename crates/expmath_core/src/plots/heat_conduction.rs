//! Transient temperature in a bar with fixed end temperatures, as the sum of
//! three decaying eigenmodes and the linear steady state.

use std::f64::consts::PI;

use crate::dashboard::{
    AnimationSpec, Binding, Change, ColumnData, Controls, DashboardResult, Snapshot, Update,
    Visualization, Widget, WidgetValue,
};
use crate::sampling::{linspace, map};

const LENGTH: &str = "length";
const CONDUCTIVITY: &str = "conductivity";
const MODES: [&str; 3] = ["first", "second", "third"];
const ADVANCED: &str = "advanced";
const LEFT: &str = "left";
const RIGHT: &str = "right";
const ANIMATE: &str = "animate";
const TIME: &str = "time";

const SAMPLES: usize = 50;

/// Solution of `u_t = kappa u_xx` on `[0, L pi]` with Dirichlet ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Length in multiples of pi.
    pub length: f64,
    pub conductivity: f64,
    pub modes: [f64; 3],
    pub left: f64,
    pub right: f64,
}

impl Bar {
    fn from_snapshot(snapshot: &Snapshot) -> DashboardResult<Self> {
        Ok(Self {
            length: snapshot.number(LENGTH)?,
            conductivity: snapshot.number(CONDUCTIVITY)?,
            modes: [
                snapshot.number(MODES[0])?,
                snapshot.number(MODES[1])?,
                snapshot.number(MODES[2])?,
            ],
            left: snapshot.number(LEFT)?,
            right: snapshot.number(RIGHT)?,
        })
    }

    pub fn end(&self) -> f64 {
        self.length * PI
    }

    pub fn steady_state(&self, x: f64) -> f64 {
        (self.right - self.left) / self.end() * x + self.left
    }

    pub fn temperature(&self, x: f64, t: f64) -> f64 {
        let l = self.length;
        let transient: f64 = self
            .modes
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let n = (i + 1) as f64;
                c * (-n * n * self.conductivity * t / (l * l)).exp() * (n * x / l).sin()
            })
            .sum();
        transient + self.steady_state(x)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Temperature,
    Boundary,
}

#[derive(Debug, Clone, Default)]
pub struct HeatConduction;

impl Visualization for HeatConduction {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::slider(LENGTH, "Length of the bar (times pi)", 0.5, 2.0, 0.5, 1.0),
            Widget::slider(CONDUCTIVITY, "Thermal diffusivity", 0.1, 2.0, 0.1, 1.0),
            Widget::slider(MODES[0], "Amplitude of the first mode", -2.0, 2.0, 0.1, 1.0),
            Widget::toggle(ADVANCED, "More options"),
            Widget::slider(MODES[1], "Amplitude of the second mode", -2.0, 2.0, 0.1, 0.0).hidden(),
            Widget::slider(MODES[2], "Amplitude of the third mode", -2.0, 2.0, 0.1, 0.0).hidden(),
            Widget::slider(LEFT, "Temperature at the left end u(t, 0)", -2.0, 2.0, 0.1, 0.0)
                .hidden(),
            Widget::slider(RIGHT, "Temperature at the right end u(t, L)", -2.0, 2.0, 0.1, 0.0)
                .hidden(),
            Widget::toggle(ANIMATE, "Animate"),
            Widget::slider(TIME, "Time", 0.0, 10.0, 0.1, 0.0),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(
                Recompute::Temperature,
                &[LENGTH, CONDUCTIVITY, "first", "second", "third", LEFT, RIGHT, TIME],
            ),
            Binding::new(Recompute::Boundary, &[LENGTH, LEFT, RIGHT]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let bar = Bar::from_snapshot(snapshot)?;
        match which {
            Recompute::Temperature => {
                let t = snapshot.number(TIME)?;
                let x = linspace(0.0, bar.end(), SAMPLES);
                let y = map(&x, |x| bar.temperature(x, t));
                Ok(Update::new().sink("temperature", ColumnData::xy(x, y)))
            }
            Recompute::Boundary => Ok(Update::new().sink(
                "steady_state",
                ColumnData::xy(vec![0.0, bar.end()], vec![bar.left, bar.right]),
            )),
        }
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if change.is(ADVANCED) && change.new == WidgetValue::Flag(true) {
            controls.set_visible(ADVANCED, false)?;
            for name in [MODES[1], MODES[2], LEFT, RIGHT] {
                controls.set_visible(name, true)?;
            }
        }
        Ok(())
    }

    fn animation(&self) -> Option<AnimationSpec> {
        Some(AnimationSpec {
            toggle: ANIMATE,
            target: TIME,
        })
    }
}
