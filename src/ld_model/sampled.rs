use crate::error::LdModelError;
use crate::interpolate::interp_into;
use crate::ld_model::{LdEvaluation, LdModelTrait};
use crate::profiles::{ProfileLibrary, ProfileRequest, ProfileService};

use log::info;
use macro_const::macro_const;
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, Axis, s};
use rand::RngCore;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

macro_const! {
    const DOC: &str = r"
Limb-darkening model backed by a library of sampled stellar intensity profiles

Profiles are samples from the posterior of stellar-atmosphere models conditioned on the
stellar parameter estimates, one set per passband. The model doesn't have free parameters,
the parameter batch is used for its number of rows only.

In the stochastic mode every row draws a library sample uniformly, the same draw gives both
the intensity profile, linearly interpolated from the native $\mu$ grid to the requested one
with constant extrapolation, and the disk-integrated coefficient
$$
-2\pi \int z\,I(z)\,dz
$$
taken along the native $z$ grid order with the trapezoidal rule. The sign is positive for
libraries sampled over descending $z$. Drawn indices are reported in the evaluation result.

In the frozen mode the mean profile of every passband is used for all rows, so evaluation
is deterministic.
";
}

#[doc = DOC!()]
#[derive(Clone, Debug)]
pub struct SampledLdModel {
    library: Arc<ProfileLibrary>,
    frozen: bool,
}

impl SampledLdModel {
    /// Request a profile library from the service
    ///
    /// It is an expensive call, a model is expected to be created once per fitting session.
    pub fn new(
        request: &ProfileRequest,
        frozen: bool,
        service: &ProfileService,
    ) -> Result<Self, LdModelError> {
        let library = service.create_profiles(request)?;
        info!(
            "sampled limb darkening model: {} passbands, {} samples, frozen = {}",
            library.n_passbands(),
            library.n_samples(),
            frozen
        );
        Ok(Self::from_library(library, frozen))
    }

    pub fn from_library(library: impl Into<Arc<ProfileLibrary>>, frozen: bool) -> Self {
        Self {
            library: library.into(),
            frozen,
        }
    }

    pub fn library(&self) -> &ProfileLibrary {
        &self.library
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) -> &mut Self {
        self.frozen = frozen;
        self
    }

    pub fn n_passbands(&self) -> usize {
        self.library.n_passbands()
    }

    pub const fn doc() -> &'static str {
        DOC
    }

    fn evaluate_frozen(&self, mu: ArrayView1<f64>, n_vectors: usize) -> LdEvaluation {
        let lib = &self.library;
        let mut profiles = Array3::zeros((n_vectors, lib.n_passbands(), mu.len()));
        let mut coefficients = Array2::zeros((n_vectors, lib.n_passbands()));
        let (mut first_profiles, mut rest_profiles) =
            profiles.view_mut().split_at(Axis(0), usize::min(1, n_vectors));
        let (mut first_coefficients, mut rest_coefficients) = coefficients
            .view_mut()
            .split_at(Axis(0), usize::min(1, n_vectors));
        if n_vectors > 0 {
            for i_pb in 0..lib.n_passbands() {
                interp_into(
                    first_profiles.slice_mut(s![0, i_pb, ..]),
                    mu,
                    lib.mu_slice(),
                    lib.mean_profile(i_pb),
                );
                first_coefficients[[0, i_pb]] = lib.mean_coefficient(i_pb);
            }
            rest_profiles.assign(&first_profiles);
            rest_coefficients.assign(&first_coefficients);
        }
        LdEvaluation {
            profiles,
            coefficients,
            draws: None,
        }
    }

    fn evaluate_stochastic(
        &self,
        mu: ArrayView1<f64>,
        n_vectors: usize,
        rng: &mut dyn RngCore,
    ) -> LdEvaluation {
        let lib = &self.library;
        let uniform = Uniform::new(0, lib.n_samples()).expect("library is never empty");
        let draws: Array1<usize> = (0..n_vectors).map(|_| uniform.sample(rng)).collect();

        let mut profiles = Array3::zeros((n_vectors, lib.n_passbands(), mu.len()));
        let mut coefficients = Array2::zeros((n_vectors, lib.n_passbands()));
        for ((&sample, mut row_profiles), mut row_coefficients) in draws
            .iter()
            .zip(profiles.outer_iter_mut())
            .zip(coefficients.outer_iter_mut())
        {
            for (i_pb, (profile, coefficient)) in row_profiles
                .outer_iter_mut()
                .zip(row_coefficients.iter_mut())
                .enumerate()
            {
                interp_into(profile, mu, lib.mu_slice(), lib.profile(i_pb, sample));
                *coefficient = lib.coefficient(i_pb, sample);
            }
        }
        LdEvaluation {
            profiles,
            coefficients,
            draws: Some(draws),
        }
    }
}

impl LdModelTrait for SampledLdModel {
    fn evaluate_with_rng(
        &self,
        mu: ArrayView1<f64>,
        pv: ArrayView2<f64>,
        rng: &mut dyn RngCore,
    ) -> Result<LdEvaluation, LdModelError> {
        if mu.is_empty() {
            return Err(LdModelError::EmptyGrid);
        }
        let n_vectors = pv.nrows();
        Ok(if self.frozen {
            self.evaluate_frozen(mu, n_vectors)
        } else {
            self.evaluate_stochastic(mu, n_vectors, rng)
        })
    }

    /// Not supported, profile library has no analytic intensity for arbitrary parameters
    fn integrate(&self, _x: &[f64]) -> Result<f64, LdModelError> {
        Err(LdModelError::NotSupported {
            model: "sampled",
            operation: "integrate",
        })
    }
}
