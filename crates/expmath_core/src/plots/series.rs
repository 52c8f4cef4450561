//! Sequence terms next to their partial sums, with an optional
//! comparison sequence acting as convergent majorant or divergent minorant.

use crate::dashboard::{
    Binding, Change, Choice, ColumnData, Controls, DashboardResult, Snapshot, Update,
    Visualization, Widget, WidgetValue,
};
use crate::sampling::linspace;

const SEQUENCE: &str = "sequence";
const COUNT: &str = "count";
const ADVANCED: &str = "advanced";
const PARAMETER: &str = "parameter";
const AID: &str = "aid";
const AID_KIND: &str = "aid_kind";
const AID_SCALE: &str = "aid_scale";

/// Bars of the comparison sums sit right of the main bars.
const BAR_WIDTH: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    Harmonic,
    InverseSquares,
    Geometric,
    Sine,
}

impl Choice for Sequence {
    const ALL: &'static [Self] = &[
        Sequence::Harmonic,
        Sequence::InverseSquares,
        Sequence::Geometric,
        Sequence::Sine,
    ];

    fn label(self) -> &'static str {
        match self {
            Sequence::Harmonic => "1/k",
            Sequence::InverseSquares => "1/k^2",
            Sequence::Geometric => "(1/a)^k",
            Sequence::Sine => "sin(a k)",
        }
    }
}

impl Sequence {
    pub fn term(self, k: f64, a: f64) -> f64 {
        match self {
            Sequence::Harmonic => a / k,
            Sequence::InverseSquares => a / (k * k),
            Sequence::Geometric => (1.0 / a).powf(k),
            Sequence::Sine => (a * k).sin(),
        }
    }

    /// Only the last two sequences are shaped by the parameter slider.
    fn uses_parameter(self) -> bool {
        matches!(self, Sequence::Geometric | Sequence::Sine)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aid {
    ConvergentMajorant,
    DivergentMinorant,
}

impl Choice for Aid {
    const ALL: &'static [Self] = &[Aid::ConvergentMajorant, Aid::DivergentMinorant];

    fn label(self) -> &'static str {
        match self {
            Aid::ConvergentMajorant => "Convergent majorant",
            Aid::DivergentMinorant => "Divergent minorant",
        }
    }
}

impl Aid {
    fn sequence(self) -> Sequence {
        match self {
            Aid::ConvergentMajorant => Sequence::InverseSquares,
            Aid::DivergentMinorant => Sequence::Harmonic,
        }
    }
}

/// Terms and running partial sums for `k = 1..=count`.
pub fn partial_sums(sequence: Sequence, count: usize, a: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let k = linspace(1.0, count as f64, count);
    let terms: Vec<f64> = k.iter().map(|&k| sequence.term(k, a)).collect();
    let sums = terms
        .iter()
        .scan(0.0, |acc, t| {
            *acc += t;
            Some(*acc)
        })
        .collect();
    (k, terms, sums)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Sums,
}

#[derive(Debug, Clone, Default)]
pub struct Series;

impl Visualization for Series {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(SEQUENCE, Sequence::Harmonic),
            Widget::slider(COUNT, "Number of terms", 1.0, 20.0, 1.0, 4.0),
            Widget::toggle(ADVANCED, "Advanced options"),
            Widget::slider(PARAMETER, "Parameter a", -5.0, 5.0, 0.1, 2.0).hidden(),
            Widget::toggle(AID, "Show convergence aid").hidden(),
            Widget::buttons(AID_KIND, Aid::ConvergentMajorant).hidden(),
            Widget::slider(AID_SCALE, "Scale of the aid", 0.5, 3.0, 0.1, 1.0).hidden(),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![Binding::new(
            Recompute::Sums,
            &[SEQUENCE, COUNT, PARAMETER, AID, AID_KIND, AID_SCALE],
        )]
    }

    fn recompute(&self, _which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        let sequence: Sequence = snapshot.choice(SEQUENCE)?;
        let count = snapshot.count(COUNT)?;
        let a = if sequence.uses_parameter() {
            snapshot.number(PARAMETER)?
        } else {
            1.0
        };
        let aid_active = snapshot.flag(AID)?;

        let (k, terms, sums) = partial_sums(sequence, count, a);
        let shift = if aid_active { BAR_WIDTH / 2.0 } else { 0.0 };
        let centres: Vec<f64> = k.iter().map(|k| k - shift).collect();

        let (aid_terms, aid_sums) = if aid_active {
            let aid: Aid = snapshot.choice(AID_KIND)?;
            let (aid_k, aid_terms, aid_sums) =
                partial_sums(aid.sequence(), count, snapshot.number(AID_SCALE)?);
            let aid_centres: Vec<f64> = aid_k.iter().map(|k| k + shift).collect();
            (
                ColumnData::xy(aid_k, aid_terms),
                ColumnData::new()
                    .with("x_center", aid_centres)
                    .with("height", aid_sums),
            )
        } else {
            (
                ColumnData::xy(Vec::new(), Vec::new()),
                ColumnData::new()
                    .with("x_center", Vec::<f64>::new())
                    .with("height", Vec::<f64>::new()),
            )
        };

        Ok(Update::new()
            .sink("sequence", ColumnData::xy(k, terms))
            .sink(
                "partial_sums",
                ColumnData::new().with("x_center", centres).with("height", sums),
            )
            .sink("aid_sequence", aid_terms)
            .sink("aid_partial_sums", aid_sums))
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if change.is(ADVANCED) && change.new == WidgetValue::Flag(true) {
            controls.set_visible(ADVANCED, false)?;
            for name in [PARAMETER, AID, AID_KIND, AID_SCALE] {
                controls.set_visible(name, true)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    #[test]
    fn harmonic_partial_sums() {
        let (k, terms, sums) = partial_sums(Sequence::Harmonic, 4, 1.0);
        assert_eq!(k, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(terms[1], 0.5);
        assert!((sums[3] - 25.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn parameter_is_ignored_by_fixed_sequences() {
        let mut dashboard = Dashboard::new(Series, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        let frame = dashboard.set_number(PARAMETER, 4.0).unwrap();
        let heights = frame.sinks["partial_sums"].values("height").unwrap();
        assert!((heights[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn aid_shifts_bars_apart() {
        let mut dashboard = Dashboard::new(Series, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        let frame = dashboard.set_flag(ADVANCED, true).unwrap();
        assert_eq!(frame.recomputes, 0);
        assert_eq!(frame.widgets.len(), 5);

        let frame = dashboard.set_flag(AID, true).unwrap();
        let main = frame.sinks["partial_sums"].values("x_center").unwrap();
        let aid = frame.sinks["aid_partial_sums"].values("x_center").unwrap();
        assert!((aid[0] - main[0] - BAR_WIDTH).abs() < 1e-12);
        let aid_heights = frame.sinks["aid_partial_sums"].values("height").unwrap();
        assert!((aid_heights[1] - 1.25).abs() < 1e-12);
    }
}
