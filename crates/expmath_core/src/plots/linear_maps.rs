//! Images of three fixed vectors under a selectable 2x2 matrix, optionally
//! blended in from the identity.

use nalgebra::{Matrix2, Vector2};
use tracing::warn;

use crate::dashboard::{
    Binding, Change, Choice, ColumnData, Controls, DashboardResult, Snapshot, Update,
    Visualization, Widget, WidgetValue,
};
use crate::linalg::compute_eigenpairs;

const MATRIX: &str = "matrix";
const A: &str = "a";
const B: &str = "b";
const BLEND: &str = "blend";
const INTENSITY: &str = "intensity";

pub const INPUTS: [(f64, f64); 3] = [(2.0, 3.0), (2.0, 0.0), (0.0, 2.0)];
const EIGENVECTOR_LENGTH: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    Shear,
    Rotation,
    Scaling,
    RotationScaling,
}

impl Choice for MatrixKind {
    const ALL: &'static [Self] = &[
        MatrixKind::Shear,
        MatrixKind::Rotation,
        MatrixKind::Scaling,
        MatrixKind::RotationScaling,
    ];

    fn label(self) -> &'static str {
        match self {
            MatrixKind::Shear => "Matrix 1",
            MatrixKind::Rotation => "Matrix 2",
            MatrixKind::Scaling => "Matrix 3",
            MatrixKind::RotationScaling => "Matrix 4",
        }
    }
}

impl MatrixKind {
    pub fn matrix(self, a: f64, b: f64) -> Matrix2<f64> {
        match self {
            MatrixKind::Shear => Matrix2::new(0.5, a, 1.0, 0.5),
            MatrixKind::Rotation => Matrix2::new(a.cos(), -a.sin(), a.sin(), a.cos()),
            MatrixKind::Scaling => Matrix2::new(a, 0.0, 0.0, b),
            MatrixKind::RotationScaling => Matrix2::new(a, -b, b, a),
        }
    }

    pub fn uses_b(self) -> bool {
        matches!(self, MatrixKind::Scaling | MatrixKind::RotationScaling)
    }

    fn latex(self, a: f64, b: f64) -> String {
        match self {
            MatrixKind::Shear => format!(
                "A = \\begin{{pmatrix}} 0.5 & a \\\\ 1 & 0.5 \\end{{pmatrix}} = \\begin{{pmatrix}} 0.50 & {a:.2} \\\\ 1.00 & 0.50 \\end{{pmatrix}}"
            ),
            MatrixKind::Rotation => format!(
                "A = \\begin{{pmatrix}} \\cos a & -\\sin a \\\\ \\sin a & \\cos a \\end{{pmatrix}} = \\begin{{pmatrix}} {:.2} & {:.2} \\\\ {:.2} & {:.2} \\end{{pmatrix}}",
                a.cos(),
                -a.sin(),
                a.sin(),
                a.cos()
            ),
            MatrixKind::Scaling => format!(
                "A = \\begin{{pmatrix}} a & 0 \\\\ 0 & b \\end{{pmatrix}} = \\begin{{pmatrix}} {a:.2} & 0.00 \\\\ 0.00 & {b:.2} \\end{{pmatrix}}"
            ),
            MatrixKind::RotationScaling => format!(
                "A = \\begin{{pmatrix}} a & -b \\\\ b & a \\end{{pmatrix}} = \\begin{{pmatrix}} {a:.2} & {:.2} \\\\ {b:.2} & {a:.2} \\end{{pmatrix}}",
                -b
            ),
        }
    }
}

/// `(1 - c) I + c A`.
pub fn blend(matrix: Matrix2<f64>, intensity: f64) -> Matrix2<f64> {
    Matrix2::identity() * (1.0 - intensity) + matrix * intensity
}

fn arrow(v: Vector2<f64>) -> ColumnData {
    ColumnData::new()
        .with("x", vec![0.0, v.x])
        .with("y", vec![0.0, v.y])
        .with("size", vec![0.0, 10.0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Inputs,
    Transform,
}

#[derive(Debug, Clone, Default)]
pub struct LinearMaps;

impl Visualization for LinearMaps {
    type Recompute = Recompute;

    fn widgets(&self) -> Vec<Widget> {
        vec![
            Widget::buttons(MATRIX, MatrixKind::Shear),
            Widget::slider(A, "Parameter a", -3.0, 3.0, 0.1, 1.0),
            Widget::slider(B, "Parameter b", -3.0, 3.0, 0.1, 1.0).hidden(),
            Widget::toggle(BLEND, "Transition from the identity"),
            Widget::slider(INTENSITY, "Intensity", 0.0, 1.0, 0.01, 1.0).hidden(),
        ]
    }

    fn bindings(&self) -> Vec<Binding<Recompute>> {
        vec![
            Binding::new(Recompute::Inputs, &[]),
            Binding::new(Recompute::Transform, &[MATRIX, A, B, INTENSITY]),
        ]
    }

    fn recompute(&self, which: Recompute, snapshot: &Snapshot) -> DashboardResult<Update> {
        match which {
            Recompute::Inputs => Ok(INPUTS
                .iter()
                .enumerate()
                .fold(Update::new(), |update, (i, &(x, y))| {
                    update.sink(&format!("input_{}", i + 1), arrow(Vector2::new(x, y)))
                })),
            Recompute::Transform => {
                let kind: MatrixKind = snapshot.choice(MATRIX)?;
                let a = snapshot.number(A)?;
                let b = snapshot.number(B)?;
                let matrix = blend(kind.matrix(a, b), snapshot.number(INTENSITY)?);

                let mut update = INPUTS.iter().enumerate().fold(
                    Update::new(),
                    |update, (i, &(x, y))| {
                        update.sink(
                            &format!("output_{}", i + 1),
                            arrow(matrix * Vector2::new(x, y)),
                        )
                    },
                );

                let mut xs = Vec::new();
                let mut ys = Vec::new();
                let mut values = Vec::new();
                match compute_eigenpairs(2, &[matrix.m11, matrix.m12, matrix.m21, matrix.m22]) {
                    Ok(pairs) => {
                        for pair in pairs {
                            values.push(if pair.value.is_real() {
                                format!("{:.2}", pair.value.re)
                            } else {
                                format!("{:.2} {:+.2}i", pair.value.re, pair.value.im)
                            });
                            if let Some(v) = pair.real_vector() {
                                let (dx, dy) = (v[0] * EIGENVECTOR_LENGTH, v[1] * EIGENVECTOR_LENGTH);
                                xs.push(vec![-dx, dx]);
                                ys.push(vec![-dy, dy]);
                            }
                        }
                    }
                    Err(err) => warn!(%err, "eigen decomposition failed"),
                }

                update = update
                    .sink("eigenvectors", ColumnData::lines(xs, ys))
                    .text("matrix_label", kind.latex(a, b))
                    .text("eigenvalues", format!("Eigenvalues: {}", values.join(", ")));
                Ok(update)
            }
        }
    }

    fn react(&mut self, change: &Change, controls: &mut Controls<'_>) -> DashboardResult<()> {
        if change.is(MATRIX) {
            let kind: MatrixKind = controls.choice(MATRIX)?;
            controls.set_visible(B, kind.uses_b())?;
        } else if change.is(BLEND) && change.new == WidgetValue::Flag(true) {
            controls.set_visible(BLEND, false)?;
            controls.set_visible(INTENSITY, true)?;
            controls.set_number(INTENSITY, 0.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardSettings};

    fn dashboard() -> Dashboard<LinearMaps> {
        let mut dashboard = Dashboard::new(LinearMaps, DashboardSettings::default()).unwrap();
        dashboard.populate().unwrap();
        dashboard
    }

    #[test]
    fn zero_intensity_is_identity() {
        let m = blend(MatrixKind::Rotation.matrix(1.3, 0.0), 0.0);
        assert_eq!(m, Matrix2::identity());
    }

    #[test]
    fn scaling_maps_inputs_componentwise() {
        let mut dashboard = dashboard();
        let frame = dashboard.set_choice(MATRIX, MatrixKind::Scaling).unwrap();
        assert!(frame.widget(B).unwrap().visible);

        let frame = dashboard.set_number(B, 2.0).unwrap();
        let out = &frame.sinks["output_1"];
        assert_eq!(out.values("x").unwrap()[1], 2.0);
        assert_eq!(out.values("y").unwrap()[1], 6.0);
        assert_eq!(frame.texts["eigenvalues"].matches(", ").count(), 1);
        assert_eq!(frame.sinks["eigenvectors"].len(), 2);
    }

    #[test]
    fn rotation_has_no_real_eigenvectors() {
        let mut dashboard = dashboard();
        let frame = dashboard.set_choice(MATRIX, MatrixKind::Rotation).unwrap();
        assert!(frame.widget(B).is_none());
        assert!(!dashboard.widget(B).unwrap().visible);
        assert!(frame.sinks["eigenvectors"].is_empty());
        assert!(frame.texts["eigenvalues"].ends_with('i'));
    }

    #[test]
    fn blend_toggle_starts_from_identity() {
        let mut dashboard = dashboard();
        let frame = dashboard.set_flag(BLEND, true).unwrap();
        assert_eq!(frame.recomputes, 1);
        let out = &frame.sinks["output_2"];
        assert_eq!(out.values("x").unwrap()[1], 2.0);
        assert_eq!(out.values("y").unwrap()[1], 0.0);
    }
}
