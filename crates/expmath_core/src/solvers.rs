use crate::traits::{DynamicalSystem, Scalar, Steppable};

/// Forward Euler stepper.
pub struct ExplicitEuler<T: Scalar> {
    slope: Vec<T>,
}

impl<T: Scalar> ExplicitEuler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            slope: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for ExplicitEuler<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        system.apply(*t, state, &mut self.slope);
        for (x, k) in state.iter_mut().zip(&self.slope) {
            *x = *x + dt * *k;
        }
        *t = *t + dt;
    }
}
