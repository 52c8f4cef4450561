//! Epsilon tunnels around sequences: convergence towards a limit, or
//! boundedness between two lines.

use crate::dashboard::{
    Binding, Bounds, Change, Choice, ColumnData, Controls, DashboardResult, Snapshot, Update,
    Visualization, Widget, WidgetValue,
};

const SEQUENCE: &str = "sequence";
const COUNT: &str = "count";
const MODE: &str = "mode";
const UPPER: &str = "upper";
const LOWER: &str = "lower";

/// Narrowest tunnel and the gap kept to the edges of the view.
const MIN_WIDTH: f64 = 0.05;
const STEP: f64 = 0.01;
const LINE_OVERHANG: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    Harmonic,
    SquareRoot,
    Sine,
}

impl Choice for Sequence {
    const ALL: &'static [Self] = &[Sequence::Harmonic, Sequence::SquareRoot, Sequence::Sine];

    fn label(self) -> &'static str {
        match self {
            Sequence::Harmonic => "a_n = 1/n",
            Sequence::SquareRoot => "a_n = sqrt(n)",
            Sequence::Sine => "a_n = sin(n)",
        }
    }
}

impl Sequence {
    pub fn term(self, n: f64) -> f64 {
        match self {
            Sequence::Harmonic => n.recip(),
            Sequence::SquareRoot => n.sqrt(),
            Sequence::Sine => n.sin(),
        }
    }

    /// Indices `1..=count` and the terms at them.
    pub fn terms(self, count: usize) -> (Vec<f64>, Vec<f64>) {
        (1..=count)
            .map(|n| (n as f64, self.term(n as f64)))
            .unzip()
    }

    /// Vertical view: two units of room around the truncated extremes.
    pub fn view(self, count: usize) -> (f64, f64) {
        let (_, terms) = self.terms(count);
        let min = terms.iter().copied().fold(f64::INFINITY, f64::min);
        let max = terms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min.trunc() - 2.0, max.trunc() + 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Convergence,
    Boundedness,
}

impl Choice for Mode {
    const ALL: &'static [Self] = &[Mode::Convergence, Mode::Boundedness];

    fn label(self) -> &'static str {
        match self {
            Mode::Convergence => "Convergence",
            Mode::Boundedness => "Boundedness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSetup {
    pub title: &'static str,
    pub bounds: Bounds,
    pub value: f64,
}

impl Mode {
    /// The tunnel `(lower, upper)` described by the two slider values.
    ///
    /// In convergence mode the upper slider holds the limit and the lower
    /// one the width epsilon.
    pub fn tunnel(self, upper: f64, lower: f64) -> (f64, f64) {
        match self {
            Mode::Convergence => (upper - lower, upper + lower),
            Mode::Boundedness => (upper.min(lower), upper.max(lower)),
        }
    }

    /// Slider values describing `tunnel` in this mode.
    pub fn values(self, (lower, upper): (f64, f64)) -> (f64, f64) {
        match self {
            Mode::Convergence => ((upper + lower) / 2.0, (upper - lower) / 2.0),
            Mode::Boundedness => (upper, lower),
        }
    }

    /// Titles, bounds and clamped values for the upper and lower sliders.
    pub fn sliders(self, view: (f64, f64), upper: f64, lower: f64) -> [SliderSetup; 2] {
        let (bottom, top) = view;
        match self {
            Mode::Convergence => {
                let limit = Bounds::new(bottom + MIN_WIDTH, top - MIN_WIDTH, STEP);
                let width = Bounds::new(MIN_WIDTH, (top - bottom) / 2.1, STEP);
                [
                    SliderSetup {
                        title: "Limit a",
                        bounds: limit,
                        value: upper.clamp(limit.start, limit.end),
                    },
                    SliderSetup {
                        title: "Epsilon",
                        bounds: width,
                        value: lower.clamp(width.start, width.end),
                    },
                ]
            }
            Mode::Boundedness => {
                let lower = lower.clamp(bottom + MIN_WIDTH, top - 2.0 * MIN_WIDTH);
                let upper = upper.clamp(lower + MIN_WIDTH, top - MIN_WIDTH);
                [
                    SliderSetup {
                        title: "Upper bound",
                        bounds: Bounds::new(lower + MIN_WIDTH, top - MIN_WIDTH, STEP),
                        value: upper,
                    },
                    SliderSetup {
                        title: "Lower bound",
                        bounds: Bounds::new(bottom + MIN_WIDTH, upper - MIN_WIDTH, STEP),
                        value: lower,
                    },
                ]
            }
        }
    }
}

/// Splits the terms into those inside the closed tunnel and those outside.
pub fn partition(
    xs: &[f64],
    ys: &[f64],
    (lower, upper): (f64, f64),
) -> ((Vec<f64>, Vec<f64>), (Vec<f64>, Vec<f64>)) {
    let (inside, outside): (Vec<(f64, f64)>, Vec<(f64, f64)>) = xs
        .iter()
        .copied()
        .zip(ys.iter().copied())
        .partition(|&(_, y)| lower <= y && y <= upper);
    (inside.into_iter().unzip(), outside.into_iter().unzip())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Terms,
}

#[derive(Debug, Clone, Default)]
pub struct EpsilonSequences;

impl Visualization for EpsilonSequences {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        let [upper, lower] = Mode::Convergence.sliders(Sequence::Harmonic.view(10), 1.0, 0.5);
        vec![
            Widget::buttons(SEQUENCE, Sequence::Harmonic),
            Widget::slider(COUNT, "Number of terms", 5.0, 50.0, 1.0, 10.0),
            Widget::buttons(MODE, Mode::Convergence),
            Widget::slider(
                UPPER,
                upper.title,
                upper.bounds.start,
                upper.bounds.end,
                STEP,
                upper.value,
            ),
            Widget::slider(
                LOWER,
                lower.title,
                lower.bounds.start,
                lower.bounds.end,
                STEP,
                lower.value,
            ),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![Binding::new(Recompute::Terms, &[SEQUENCE, COUNT, MODE, UPPER, LOWER])]
    }

    fn recompute(&self, _which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let sequence: Sequence = snapshot.choice(SEQUENCE)?;
        let mode: Mode = snapshot.choice(MODE)?;
        let count = snapshot.count(COUNT)?;
        let (lower, upper) = mode.tunnel(snapshot.number(UPPER)?, snapshot.number(LOWER)?);

        let (xs, ys) = sequence.terms(count);
        let ((in_x, in_y), (out_x, out_y)) = partition(&xs, &ys, (lower, upper));
        let view = sequence.view(count);

        let line_x = vec![0.0, count as f64 + LINE_OVERHANG];
        let band = ColumnData::new()
            .with("x", line_x.clone())
            .with("lower", vec![lower; 2])
            .with("upper", vec![upper; 2]);
        let edges = ColumnData::lines(
            vec![line_x.clone(), line_x],
            vec![vec![lower; 2], vec![upper; 2]],
        );
        let viewport = ColumnData::new()
            .with("x", vec![0.0, (1.1 * count as f64).trunc()])
            .with("y", vec![view.0, view.1]);
        Ok(Update::new()
            .sink("inside", ColumnData::xy(in_x, in_y))
            .sink("outside", ColumnData::xy(out_x, out_y))
            .sink("band", band)
            .sink("edges", edges)
            .sink("viewport", viewport))
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if ![SEQUENCE, COUNT, MODE, UPPER, LOWER]
            .iter()
            .any(|name| change.is(name))
        {
            return Ok(());
        }
        let sequence: Sequence = controls.choice(SEQUENCE)?;
        let mode: Mode = controls.choice(MODE)?;
        let count = controls.snapshot().count(COUNT)?;
        let (mut upper, mut lower) = (controls.number(UPPER)?, controls.number(LOWER)?);

        // Keep the drawn tunnel when switching between the two readings.
        if change.is(MODE) {
            let previous = match change.old {
                WidgetValue::Index(index) => Mode::from_index(index).unwrap_or(mode),
                _ => mode,
            };
            (upper, lower) = mode.values(previous.tunnel(upper, lower));
        }

        let [top, bottom] = mode.sliders(sequence.view(count), upper, lower);
        controls.configure_slider(UPPER, top.title, top.bounds, top.value)?;
        controls.configure_slider(LOWER, bottom.title, bottom.bounds, bottom.value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    fn dashboard() -> Dashboard<EpsilonSequences> {
        let mut dashboard =
            Dashboard::new(EpsilonSequences, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        dashboard
    }

    #[test]
    fn view_leaves_two_units_around_the_terms() {
        assert_eq!(Sequence::Harmonic.view(10), (-2.0, 3.0));
        assert_eq!(Sequence::SquareRoot.view(50), (-1.0, 9.0));
        assert_eq!(Sequence::Sine.view(20), (-2.0, 2.0));
    }

    #[test]
    fn terms_split_at_the_tunnel_edges() {
        let (xs, ys) = Sequence::Harmonic.terms(10);
        let ((in_x, _), (out_x, out_y)) = partition(&xs, &ys, (0.0, 0.5));
        assert_eq!(in_x, (2..=10).map(f64::from).collect::<Vec<_>>());
        assert_eq!(out_x, vec![1.0]);
        assert_eq!(out_y, vec![1.0]);
    }

    #[test]
    fn default_tunnel_holds_the_tail_of_the_harmonic_sequence() {
        let dashboard = dashboard();
        let band = dashboard.sink().get("band").unwrap();
        assert_eq!(band.values("lower").unwrap(), &[0.5, 0.5]);
        assert_eq!(band.values("upper").unwrap(), &[1.5, 1.5]);
        assert_eq!(dashboard.sink().get("inside").unwrap().values("x").unwrap(), &[1.0, 2.0]);
        assert_eq!(dashboard.sink().get("outside").unwrap().len(), 8);
    }

    #[test]
    fn switching_mode_keeps_the_tunnel() {
        let mut dashboard = dashboard();
        let frame = dashboard.set_choice(MODE, Mode::Boundedness).unwrap();
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.number(UPPER).unwrap(), 1.5);
        assert_eq!(snapshot.number(LOWER).unwrap(), 0.5);
        assert_eq!(frame.widget(UPPER).unwrap().title, "Upper bound");
        let lower = frame.widget(LOWER).unwrap().bounds.unwrap();
        assert!((lower.end - 1.45).abs() < 1e-12);
        assert_eq!(frame.sinks["band"].values("upper").unwrap(), &[1.5, 1.5]);

        dashboard.set_choice(MODE, Mode::Convergence).unwrap();
        let snapshot = dashboard.snapshot();
        assert!((snapshot.number(UPPER).unwrap() - 1.0).abs() < 1e-12);
        assert!((snapshot.number(LOWER).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(dashboard.widget(UPPER).unwrap().title, "Limit a");
    }

    #[test]
    fn bounds_follow_the_other_slider() {
        let mut dashboard = dashboard();
        dashboard.set_choice(MODE, Mode::Boundedness).unwrap();
        dashboard.set_number(LOWER, -1.0).unwrap();
        let upper = dashboard.widget(UPPER).unwrap().bounds.unwrap();
        assert!((upper.start - -0.95).abs() < 1e-12);
        assert!(dashboard.set_number(UPPER, -1.5).is_err());
        assert_eq!(dashboard.snapshot().number(UPPER).unwrap(), 1.5);
    }

    #[test]
    fn larger_view_rebounds_the_limit() {
        let mut dashboard = dashboard();
        let frame = dashboard.set_choice(SEQUENCE, Sequence::SquareRoot).unwrap();
        let limit = frame.widget(UPPER).unwrap().bounds.unwrap();
        assert_eq!((limit.start, limit.end), (-1.0 + MIN_WIDTH, 5.0 - MIN_WIDTH));
        assert_eq!(frame.sinks["viewport"].values("y").unwrap(), &[-1.0, 5.0]);
    }
}
