//! Scalar Newton solver and the special functions built on it.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewtonSettings {
    pub max_steps: usize,
    pub damping: f64,
    pub tolerance: f64,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            max_steps: 50,
            damping: 1.0,
            tolerance: 1e-12,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewtonOutcome {
    pub root: f64,
    pub residual: f64,
    pub iterations: usize,
}

/// Finds a root of `f` starting from `guess`.
pub fn solve_scalar(
    f: impl Fn(f64) -> f64,
    df: impl Fn(f64) -> f64,
    guess: f64,
    settings: NewtonSettings,
) -> Result<NewtonOutcome> {
    if settings.max_steps == 0 {
        bail!("max_steps must be greater than zero.");
    }
    if settings.damping <= 0.0 {
        bail!("damping must be positive.");
    }
    if settings.tolerance <= 0.0 {
        bail!("tolerance must be positive.");
    }

    let mut x = guess;
    let mut residual = f(x);
    let mut iterations = 0usize;

    while residual.abs() > settings.tolerance {
        if iterations >= settings.max_steps {
            bail!(
                "Newton solver failed to converge in {} steps (|f(x)| = {}).",
                settings.max_steps,
                residual.abs()
            );
        }
        let slope = df(x);
        if slope == 0.0 || !slope.is_finite() {
            bail!("Derivative vanished at x = {}.", x);
        }
        let step = settings.damping * residual / slope;
        x -= step;
        if !x.is_finite() {
            bail!("Newton iterate diverged.");
        }
        iterations += 1;
        residual = f(x);
        // Residuals of large arguments cannot drop below rounding noise.
        if step.abs() <= settings.tolerance * x.abs().max(1.0) {
            break;
        }
    }

    Ok(NewtonOutcome {
        root: x,
        residual,
        iterations,
    })
}

/// Principal branch of the Lambert W function, `w * exp(w) = x`.
pub fn lambert_w0(x: f64) -> Result<f64> {
    let branch_point = -(-1.0f64).exp();
    if !x.is_finite() {
        bail!("Lambert W is undefined for {}.", x);
    }
    if x < branch_point {
        bail!("{} lies below the branch point -1/e.", x);
    }
    if x == 0.0 {
        return Ok(0.0);
    }
    if x == branch_point {
        return Ok(-1.0);
    }

    let guess = if x > std::f64::consts::E {
        let l = x.ln();
        l - l.ln()
    } else if x > 0.0 {
        x / (1.0 + x)
    } else {
        // Series around the branch point.
        let p = (2.0 * (std::f64::consts::E * x + 1.0)).sqrt();
        -1.0 + p - p * p / 3.0
    };

    let outcome = solve_scalar(
        |w| w * w.exp() - x,
        |w| (w + 1.0) * w.exp(),
        guess,
        NewtonSettings::default(),
    )?;
    Ok(outcome.root)
}

pub fn factorial(n: u32) -> f64 {
    (1..=n).map(f64::from).product()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_err_contains<T: std::fmt::Debug>(result: Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = err.to_string();
        assert!(
            message.contains(needle),
            "expected error containing '{needle}', got '{message}'"
        );
    }

    #[test]
    fn lambert_w_inverts_w_exp_w() {
        for &x in &[-0.3, 0.1, 1.0, std::f64::consts::E, 10.0, 287.0, 1e6] {
            let w = lambert_w0(x).expect("lambert w");
            assert!((w * w.exp() - x).abs() <= 1e-9 * x.abs().max(1.0), "x = {x}");
        }
        assert!((lambert_w0(std::f64::consts::E).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn lambert_w_rejects_below_branch_point() {
        assert_err_contains(lambert_w0(-1.0), "branch point");
    }

    #[test]
    fn solve_scalar_validates_settings() {
        let settings = NewtonSettings {
            max_steps: 0,
            ..NewtonSettings::default()
        };
        assert_err_contains(solve_scalar(|x| x, |_| 1.0, 1.0, settings), "max_steps");
    }

    #[test]
    fn solve_scalar_finds_square_root() {
        let outcome =
            solve_scalar(|x| x * x - 2.0, |x| 2.0 * x, 1.0, NewtonSettings::default()).unwrap();
        assert!((outcome.root - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert!(outcome.iterations > 0);
    }

    #[test]
    fn factorial_of_small_numbers() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(5), 120.0);
    }
}
