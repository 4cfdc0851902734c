use crate::error::LdModelError;
use crate::ld_model::grid::IntegrationGrid;
use crate::ld_model::{LdEvaluation, LdModelTrait};

use macro_const::macro_const;
use ndarray::{Array2, Array3, ArrayView1, ArrayView2};
use rand::RngCore;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Classical parametric limb-darkening law
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LdLaw {
    /// $I = 1$
    Uniform,
    /// $I = 1 - u (1 - \mu)$
    Linear,
    /// $I = 1 - a (1 - \mu) - b (1 - \mu)^2$
    Quadratic,
    /// $I = 1 - c (1 - \mu^\alpha)$
    Power2,
    /// $I = 1 - \sum_{k=1}^4 c_k (1 - \mu^{k/2})$
    Nonlinear,
}

impl LdLaw {
    pub const MAX_COEFFICIENTS: usize = 4;

    pub const fn n_coefficients(self) -> usize {
        match self {
            Self::Uniform => 0,
            Self::Linear => 1,
            Self::Quadratic => 2,
            Self::Power2 => 2,
            Self::Nonlinear => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::Power2 => "power-2",
            Self::Nonlinear => "nonlinear",
        }
    }

    /// Intensity normalised to the disk centre, `c` must have [LdLaw::n_coefficients] values
    pub fn intensity(self, mu: f64, c: &[f64]) -> f64 {
        debug_assert_eq!(c.len(), self.n_coefficients());
        match self {
            Self::Uniform => 1.0,
            Self::Linear => 1.0 - c[0] * (1.0 - mu),
            Self::Quadratic => {
                let x = 1.0 - mu;
                1.0 - c[0] * x - c[1] * x * x
            }
            Self::Power2 => 1.0 - c[0] * (1.0 - mu.powf(c[1])),
            Self::Nonlinear => {
                let sqrt_mu = mu.sqrt();
                let mut mu_power = 1.0;
                c.iter().fold(1.0, |acc, &c| {
                    mu_power *= sqrt_mu;
                    acc - c * (1.0 - mu_power)
                })
            }
        }
    }
}

macro_const! {
    const DOC: &str = r"
Parametric limb-darkening model

Intensity profile is given by one of the classical laws ([LdLaw]) normalised to the centre of
the stellar disk. Every row of the parameter batch holds the law coefficients of all passbands,
passband-major: $[c_{1,1}, \dots, c_{1,K}, c_{2,1}, \dots, c_{P,K}]$ for $P$ passbands and a
law with $K$ coefficients.

Disk-integrated coefficient is
$$
2\pi \int_0^1 z\,I(\mu(z))\,dz, \quad \mu = \sqrt{1 - z^2},
$$
computed with the trapezoidal rule over the fixed integration grid, it equals $\pi$ for a
uniform disk.
";
}

#[doc = DOC!()]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "ParametricLdModelParameters",
    into = "ParametricLdModelParameters"
)]
pub struct ParametricLdModel {
    law: LdLaw,
    n_passbands: usize,
    grid: IntegrationGrid,
}

impl ParametricLdModel {
    pub fn new(law: LdLaw, n_passbands: usize) -> Self {
        Self::with_grid(law, n_passbands, IntegrationGrid::default())
    }

    pub fn with_grid(law: LdLaw, n_passbands: usize, grid: IntegrationGrid) -> Self {
        Self {
            law,
            n_passbands,
            grid,
        }
    }

    pub fn law(&self) -> LdLaw {
        self.law
    }

    pub fn n_passbands(&self) -> usize {
        self.n_passbands
    }

    pub fn grid(&self) -> &IntegrationGrid {
        &self.grid
    }

    /// Number of values in a single parameter vector
    pub fn n_parameters(&self) -> usize {
        self.n_passbands * self.law.n_coefficients()
    }

    pub const fn doc() -> &'static str {
        DOC
    }

    fn integrate_into(&self, coefficients: &[f64], buffer: &mut [f64]) -> f64 {
        for (i, &mu) in buffer.iter_mut().zip(self.grid.mu()) {
            *i = self.law.intensity(mu, coefficients);
        }
        self.grid.integrate_profile(buffer)
    }
}

impl LdModelTrait for ParametricLdModel {
    fn evaluate_with_rng(
        &self,
        mu: ArrayView1<f64>,
        pv: ArrayView2<f64>,
        _rng: &mut dyn RngCore,
    ) -> Result<LdEvaluation, LdModelError> {
        if mu.is_empty() {
            return Err(LdModelError::EmptyGrid);
        }
        if pv.ncols() != self.n_parameters() {
            return Err(LdModelError::ParameterShape {
                actual: pv.ncols(),
                expected: self.n_parameters(),
            });
        }
        let n_coeffs = self.law.n_coefficients();
        let n_vectors = pv.nrows();

        let mut profiles = Array3::zeros((n_vectors, self.n_passbands, mu.len()));
        let mut coefficients = Array2::zeros((n_vectors, self.n_passbands));
        let mut coeffs = [0.0; LdLaw::MAX_COEFFICIENTS];
        let mut buffer = vec![0.0; self.grid.len()];
        for ((row, mut row_profiles), mut row_coefficients) in pv
            .outer_iter()
            .zip(profiles.outer_iter_mut())
            .zip(coefficients.outer_iter_mut())
        {
            for (i_pb, (mut profile, coefficient)) in row_profiles
                .outer_iter_mut()
                .zip(row_coefficients.iter_mut())
                .enumerate()
            {
                for (dst, &src) in coeffs
                    .iter_mut()
                    .zip(row.iter().skip(i_pb * n_coeffs).take(n_coeffs))
                {
                    *dst = src;
                }
                let c = &coeffs[..n_coeffs];
                profile.zip_mut_with(&mu, |i, &mu| *i = self.law.intensity(mu, c));
                *coefficient = self.integrate_into(c, &mut buffer);
            }
        }

        Ok(LdEvaluation {
            profiles,
            coefficients,
            draws: None,
        })
    }

    fn integrate(&self, x: &[f64]) -> Result<f64, LdModelError> {
        if x.len() != self.law.n_coefficients() {
            return Err(LdModelError::ParameterShape {
                actual: x.len(),
                expected: self.law.n_coefficients(),
            });
        }
        let mut buffer = vec![0.0; self.grid.len()];
        Ok(self.integrate_into(x, &mut buffer))
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "ParametricLdModel")]
pub struct ParametricLdModelParameters {
    pub law: LdLaw,
    pub n_passbands: usize,
    #[serde(default = "IntegrationGrid::default_size")]
    pub grid_size: usize,
}

impl From<ParametricLdModel> for ParametricLdModelParameters {
    fn from(f: ParametricLdModel) -> Self {
        Self {
            law: f.law,
            n_passbands: f.n_passbands,
            grid_size: f.grid.len(),
        }
    }
}

impl TryFrom<ParametricLdModelParameters> for ParametricLdModel {
    type Error = LdModelError;

    fn try_from(p: ParametricLdModelParameters) -> Result<Self, Self::Error> {
        Ok(Self::with_grid(
            p.law,
            p.n_passbands,
            IntegrationGrid::new(p.grid_size)?,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::{Array1, array};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::PI;

    #[test]
    fn uniform_disk_integrates_to_pi() {
        let model = ParametricLdModel::new(LdLaw::Uniform, 1);
        assert_relative_eq!(model.integrate(&[]).unwrap(), PI, max_relative = 1e-12);
    }

    #[test]
    fn quadratic_integral() {
        let model = ParametricLdModel::new(LdLaw::Quadratic, 1);
        for (a, b) in [(0.4, 0.2), (0.1, 0.5), (0.0, 0.0), (0.8, -0.1)] {
            let desired = PI * (1.0 - a / 3.0 - b / 6.0);
            assert_relative_eq!(
                model.integrate(&[a, b]).unwrap(),
                desired,
                max_relative = 1e-2
            );
        }
    }

    #[test]
    fn laws_are_unity_at_disk_centre() {
        let cases: [(LdLaw, &[f64]); 5] = [
            (LdLaw::Uniform, &[]),
            (LdLaw::Linear, &[0.6]),
            (LdLaw::Quadratic, &[0.4, 0.2]),
            (LdLaw::Power2, &[0.7, 0.6]),
            (LdLaw::Nonlinear, &[0.5, -0.2, 0.6, -0.3]),
        ];
        for (law, c) in cases {
            assert_eq!(c.len(), law.n_coefficients());
            assert_relative_eq!(law.intensity(1.0, c), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn laws_at_limb() {
        assert_relative_eq!(LdLaw::Linear.intensity(0.0, &[0.6]), 0.4);
        assert_relative_eq!(LdLaw::Quadratic.intensity(0.0, &[0.4, 0.2]), 0.4);
        assert_relative_eq!(LdLaw::Power2.intensity(0.0, &[0.7, 0.6]), 0.3);
        assert_relative_eq!(
            LdLaw::Nonlinear.intensity(0.0, &[0.5, -0.2, 0.6, -0.3]),
            0.4,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            LdLaw::Nonlinear.intensity(0.25, &[0.5, 0.0, 0.0, 0.0]),
            0.75,
            epsilon = 1e-15
        );
    }

    #[test]
    fn evaluate_batch() {
        let model = ParametricLdModel::new(LdLaw::Quadratic, 2);
        let mu = Array1::linspace(0.0, 1.0, 11);
        let pv = array![[0.4, 0.2, 0.1, 0.3], [0.0, 0.0, 0.5, 0.0]];
        let mut rng = StdRng::seed_from_u64(0);
        let evaluation = model
            .evaluate_with_rng(mu.view(), pv.view(), &mut rng)
            .unwrap();
        assert_eq!(evaluation.profiles.dim(), (2, 2, 11));
        assert_eq!(evaluation.coefficients.dim(), (2, 2));
        assert!(evaluation.draws.is_none());

        for (i_row, row) in pv.outer_iter().enumerate() {
            for i_pb in 0..2 {
                let c = [row[2 * i_pb], row[2 * i_pb + 1]];
                for (i, &mu) in mu.iter().enumerate() {
                    assert_eq!(
                        evaluation.profiles[[i_row, i_pb, i]],
                        LdLaw::Quadratic.intensity(mu, &c)
                    );
                }
                assert_eq!(
                    evaluation.coefficients[[i_row, i_pb]],
                    model.integrate(&c).unwrap()
                );
            }
        }
        assert_relative_eq!(evaluation.coefficients[[1, 0]], PI, max_relative = 1e-12);
    }

    #[test]
    fn evaluate_is_deterministic() {
        let model = ParametricLdModel::new(LdLaw::Power2, 1);
        let mu = array![0.1, 0.5, 0.9];
        let pv = array![[0.7, 0.6]];
        let a = model.evaluate(mu.view(), pv.view()).unwrap();
        let b = model.evaluate(mu.view(), pv.view()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shape_errors() {
        let model = ParametricLdModel::new(LdLaw::Linear, 2);
        let pv = array![[0.1, 0.2, 0.3]];
        assert!(matches!(
            model.evaluate(array![0.5].view(), pv.view()),
            Err(LdModelError::ParameterShape {
                actual: 3,
                expected: 2
            })
        ));
        let pv = array![[0.1, 0.2]];
        assert!(matches!(
            model.evaluate(Array1::zeros(0).view(), pv.view()),
            Err(LdModelError::EmptyGrid)
        ));
        assert!(matches!(
            model.integrate(&[0.1, 0.2]),
            Err(LdModelError::ParameterShape {
                actual: 2,
                expected: 1
            })
        ));
    }

    #[test]
    fn serialization() {
        let model: ParametricLdModel =
            serde_json::from_str(r#"{"law":"power2","n_passbands":3}"#).unwrap();
        assert_eq!(model.law(), LdLaw::Power2);
        assert_eq!(model.grid().len(), IntegrationGrid::default_size());
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(
            serde_json::from_str::<ParametricLdModel>(&json).unwrap(),
            model
        );
        assert!(
            serde_json::from_str::<ParametricLdModel>(
                r#"{"law":"linear","n_passbands":1,"grid_size":1}"#
            )
            .is_err()
        );
    }
}
