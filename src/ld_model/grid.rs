use crate::error::LdModelError;
use crate::integrate::trapz_weighted;

use ndarray::{Array1, ArrayView1};
use std::f64::consts::TAU;

/// Fixed stellar-disk grid used for disk integration
///
/// `z` is the projected radial coordinate uniformly sampled over `[0, 1]` and
/// $\mu = \sqrt{1 - z^2}$ is the cosine of the viewing angle.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegrationGrid {
    z: Array1<f64>,
    mu: Array1<f64>,
}

impl IntegrationGrid {
    pub const MIN_SIZE: usize = 2;

    pub fn new(size: usize) -> Result<Self, LdModelError> {
        if size < Self::MIN_SIZE {
            return Err(LdModelError::GridTooSmall {
                actual: size,
                minimum: Self::MIN_SIZE,
            });
        }
        let z = Array1::linspace(0.0, 1.0, size);
        // linspace may overshoot unity by an ulp
        let mu = z.mapv(|z: f64| f64::max(1.0 - z * z, 0.0).sqrt());
        Ok(Self { z, mu })
    }

    #[inline]
    pub fn default_size() -> usize {
        200
    }

    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    pub fn z(&self) -> ArrayView1<'_, f64> {
        self.z.view()
    }

    pub fn mu(&self) -> ArrayView1<'_, f64> {
        self.mu.view()
    }

    /// $2\pi \int_0^1 z\,I(z)\,dz$ for an intensity profile sampled on this grid
    pub fn integrate_profile(&self, intensity: &[f64]) -> f64 {
        TAU * trapz_weighted(
            self.z.as_slice().expect("grid is contiguous"),
            self.z.as_slice().expect("grid is contiguous"),
            intensity,
        )
    }
}

impl Default for IntegrationGrid {
    fn default() -> Self {
        Self::new(Self::default_size()).expect("default grid size is valid")
    }
}
