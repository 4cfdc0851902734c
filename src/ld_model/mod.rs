use crate::error::LdModelError;

use enum_dispatch::enum_dispatch;
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2};
use rand::RngCore;
use std::fmt::Debug;

mod grid;
pub use grid::IntegrationGrid;

mod parametric;
pub use parametric::{LdLaw, ParametricLdModel, ParametricLdModelParameters};

mod sampled;
pub use sampled::SampledLdModel;

/// Output of [LdModelTrait::evaluate]
#[derive(Clone, Debug, PartialEq)]
pub struct LdEvaluation {
    /// Intensity profiles, `[vector][passband][mu]`
    pub profiles: Array3<f64>,
    /// Disk-integrated coefficients, `[vector][passband]`
    pub coefficients: Array2<f64>,
    /// Library sample drawn for every parameter vector, if the model is stochastic
    pub draws: Option<Array1<usize>>,
}

impl LdEvaluation {
    pub fn n_vectors(&self) -> usize {
        self.coefficients.nrows()
    }

    pub fn n_passbands(&self) -> usize {
        self.coefficients.ncols()
    }
}

/// Limb-darkening model interface
#[enum_dispatch]
pub trait LdModelTrait: Clone + Debug + Send + Sync {
    /// Intensity profiles over `mu` and disk-integrated coefficients for every row of the
    /// parameter batch `pv` and every passband
    fn evaluate_with_rng(
        &self,
        mu: ArrayView1<f64>,
        pv: ArrayView2<f64>,
        rng: &mut dyn RngCore,
    ) -> Result<LdEvaluation, LdModelError>;

    /// [LdModelTrait::evaluate_with_rng] using the thread-local random generator
    fn evaluate(
        &self,
        mu: ArrayView1<f64>,
        pv: ArrayView2<f64>,
    ) -> Result<LdEvaluation, LdModelError> {
        self.evaluate_with_rng(mu, pv, &mut rand::rng())
    }

    /// Disk-integrated intensity for a single parameter vector of a single passband
    fn integrate(&self, x: &[f64]) -> Result<f64, LdModelError>;
}

/// All limb-darkening models are available as variants of this enum
#[enum_dispatch(LdModelTrait)]
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum LdModel {
    Parametric(ParametricLdModel),
    Sampled(SampledLdModel),
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::profiles::ProfileLibrary;

    use approx::assert_relative_eq;
    use ndarray::{Array3, array};
    use std::f64::consts::PI;

    fn sampled() -> SampledLdModel {
        let mu = array![0.0, 0.5, 1.0];
        let z = mu.mapv(|mu: f64| (1.0 - mu * mu).sqrt());
        let profiles = Array3::from_elem((1, 4, 3), 1.0);
        let lib = ProfileLibrary::new(vec!["TESS".into()], mu, z, profiles).unwrap();
        SampledLdModel::from_library(lib, true)
    }

    #[test]
    fn dispatch() {
        let models: Vec<LdModel> = vec![
            ParametricLdModel::new(LdLaw::Uniform, 1).into(),
            sampled().into(),
        ];
        let mu = array![0.2, 0.8];
        for model in &models {
            let evaluation = model
                .evaluate(mu.view(), Array2::zeros((3, 0)).view())
                .unwrap();
            assert_eq!(evaluation.n_vectors(), 3);
            assert_eq!(evaluation.n_passbands(), 1);
            for &i in evaluation.profiles.iter() {
                assert_relative_eq!(i, 1.0);
            }
        }
        assert_relative_eq!(models[0].integrate(&[]).unwrap(), PI, max_relative = 1e-12);
        assert!(matches!(
            models[1].integrate(&[]),
            Err(LdModelError::NotSupported { .. })
        ));
    }
}
