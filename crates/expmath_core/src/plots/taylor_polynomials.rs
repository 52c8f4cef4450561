//! Taylor polynomials of the sine around an adjustable expansion point.

use crate::dashboard::{
    Binding, Change, ColumnData, Controls, DashboardResult, Snapshot, Update, Visualization,
    Widget, WidgetValue,
};
use crate::sampling::{linspace, map};
use crate::special::factorial;

const ORDER: &str = "order";
const SPOT: &str = "spot";
const ADVANCED: &str = "advanced";
const ERROR_POSITION: &str = "error_position";

const SAMPLES: usize = 100;

/// `k`-th derivative of the sine at `x`.
fn sine_derivative(k: u32, x: f64) -> f64 {
    match k % 4 {
        0 => x.sin(),
        1 => x.cos(),
        2 => -x.sin(),
        _ => -x.cos(),
    }
}

/// Degree `order` Taylor polynomial of the sine around `spot`, evaluated at `x`.
pub fn taylor(order: u32, spot: f64, x: f64) -> f64 {
    (0..=order)
        .map(|k| sine_derivative(k, spot) * (x - spot).powi(k as i32) / factorial(k))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Original,
    Approximation,
}

#[derive(Debug, Clone, Default)]
pub struct TaylorPolynomials;

impl Visualization for TaylorPolynomials {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::slider(ORDER, "Order", 0.0, 5.0, 1.0, 0.0),
            Widget::slider(SPOT, "Expansion point", -3.0, 3.0, 0.1, 1.0),
            Widget::toggle(ADVANCED, "Show approximation error"),
            Widget::slider(ERROR_POSITION, "Error position", -3.0, 3.0, 0.1, -1.0).hidden(),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(Recompute::Original, &[]),
            Binding::new(
                Recompute::Approximation,
                &[ORDER, SPOT, ADVANCED, ERROR_POSITION],
            ),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        match which {
            Recompute::Original => {
                let x = linspace(-5.0, 5.0, SAMPLES);
                let y = map(&x, f64::sin);
                Ok(Update::new().sink("original", ColumnData::xy(x, y)))
            }
            Recompute::Approximation => {
                let order = snapshot.count(ORDER)? as u32;
                let spot = snapshot.number(SPOT)?;
                let x = linspace(-5.0, 5.0, SAMPLES);
                let y = map(&x, |x| taylor(order, spot, x));

                let error_bar = if snapshot.flag(ADVANCED)? {
                    let at = snapshot.number(ERROR_POSITION)?;
                    ColumnData::xy(vec![at, at], vec![at.sin(), taylor(order, spot, at)])
                } else {
                    ColumnData::xy(Vec::new(), Vec::new())
                };

                Ok(Update::new()
                    .sink("taylor", ColumnData::xy(x, y))
                    .sink("spot", ColumnData::xy(vec![spot], vec![spot.sin()]))
                    .sink("error_bar", error_bar))
            }
        }
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if change.is(ADVANCED) && change.new == WidgetValue::Flag(true) {
            controls.set_visible(ADVANCED, false)?;
            controls.set_visible(ERROR_POSITION, true)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    #[test]
    fn order_zero_is_constant() {
        for &x in &[-2.0, 0.0, 4.0] {
            assert_eq!(taylor(0, 1.0, x), 1.0f64.sin());
        }
    }

    #[test]
    fn order_five_matches_sine_near_spot() {
        assert!((taylor(5, 0.0, 0.5) - 0.5f64.sin()).abs() < 1e-5);
    }

    #[test]
    fn advanced_toggle_reveals_error_slider_with_one_recompute() {
        let mut dashboard = Dashboard::new(TaylorPolynomials, DashboardSettings::default()).unwrap();
        let populated = dashboard.populate().unwrap();
        assert!(populated.sinks["error_bar"].is_empty());

        let frame = dashboard.set_flag(ADVANCED, true).unwrap();
        assert_eq!(frame.recomputes, 1);
        let names: Vec<&str> = frame.widgets.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec![ADVANCED, ERROR_POSITION]);
        assert!(!frame.widgets[0].visible);
        assert!(frame.widgets[1].visible);

        let bar = &frame.sinks["error_bar"];
        assert_eq!(bar.values("x").unwrap(), &[-1.0, -1.0]);
    }
}
