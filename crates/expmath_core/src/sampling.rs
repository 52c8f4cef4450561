//! Grids and guarded arithmetic shared by the plots.

/// Added to denominators that may reach zero at a slider bound.
pub const EPSILON: f64 = 1e-4;

/// `n` evenly spaced samples over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Evaluates `f` on every sample.
pub fn map(xs: &[f64], f: impl Fn(f64) -> f64) -> Vec<f64> {
    xs.iter().map(|&x| f(x)).collect()
}

/// Row-major square grid: the outer loop walks `y`, the inner one `x`.
pub fn grid(start: f64, end: f64, n: usize) -> Vec<(f64, f64)> {
    let axis = linspace(start, end, n);
    axis.iter()
        .flat_map(|&y| axis.iter().map(move |&x| (x, y)))
        .collect()
}

/// `num / (den + EPSILON)`.
pub fn guarded_div(num: f64, den: f64) -> f64 {
    num / (den + EPSILON)
}

/// Composite midpoint rule over `[a, b]` with `n` panels; signed when `b < a`.
pub fn midpoint_rule(f: impl Fn(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let h = (b - a) / n as f64;
    (0..n).map(|i| f(a + h * (i as f64 + 0.5))).sum::<f64>() * h
}

/// Piecewise linear interpolation through `(xs, ys)`, clamped at both ends.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return f64::NAN;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    let upper = xs[..n].partition_point(|&v| v <= x).min(n - 1);
    let lower = upper - 1;
    let span = xs[upper] - xs[lower];
    if span == 0.0 {
        return ys[lower];
    }
    let w = (x - xs[lower]) / span;
    ys[lower] * (1.0 - w) + ys[upper] * w
}
