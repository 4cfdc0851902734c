use crate::error::{ProfileLibraryError, ProfileSourceError};
use crate::integrate::trapz_weighted;
use crate::profiles::passband::Passband;

use itertools::Itertools;
use log::debug;
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayView3, Axis, s};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Disk-integrated coefficient of an intensity profile sampled over `z`
///
/// The coefficient is $-2\pi \int z\,I(z)\,dz$ along the grid order, so it is positive for a
/// positive profile sampled over a descending `z` (ascending `mu`), which is the grid order of
/// stellar-atmosphere profile libraries.
pub fn disk_coefficient(z: &[f64], profile: &[f64]) -> f64 {
    -TAU * trapz_weighted(z, z, profile)
}

/// Library of sampled limb-darkening intensity profiles
///
/// Profiles are sampled over a native `(mu, z)` grid, one set of samples per passband. The
/// library is immutable after construction, mean profiles and disk-integrated coefficients are
/// precomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "ProfileLibraryParameters",
    try_from = "ProfileLibraryParameters"
)]
pub struct ProfileLibrary {
    passbands: Vec<Passband>,
    mu: Array1<f64>,
    z: Array1<f64>,
    // [passband, sample, grid point]
    profiles: Array3<f64>,
    // [passband, grid point]
    mean_profiles: Array2<f64>,
    // [passband, sample]
    coefficients: Array2<f64>,
    // [passband]
    mean_coefficients: Array1<f64>,
}

impl ProfileLibrary {
    pub const MIN_GRID_SIZE: usize = 2;

    /// Create a library from profiles of shape `[passband, sample, grid point]`
    ///
    /// `mu` and `z` must have the same length as the last profile axis, `mu` must be monotonic.
    pub fn new(
        passbands: Vec<Passband>,
        mu: Array1<f64>,
        z: Array1<f64>,
        profiles: Array3<f64>,
    ) -> Result<Self, ProfileLibraryError> {
        let (n_passbands, n_samples, grid_size) = profiles.dim();
        if n_passbands == 0 || n_samples == 0 {
            return Err(ProfileLibraryError::Empty);
        }
        if passbands.len() != n_passbands {
            return Err(ProfileLibraryError::PassbandCountMismatch {
                passbands: passbands.len(),
                profiles: n_passbands,
            });
        }
        if mu.len() != grid_size || z.len() != grid_size {
            return Err(ProfileLibraryError::GridSizeMismatch {
                mu: mu.len(),
                z: z.len(),
                profiles: grid_size,
            });
        }
        if grid_size < Self::MIN_GRID_SIZE {
            return Err(ProfileLibraryError::ShortGrid {
                actual: grid_size,
                minimum: Self::MIN_GRID_SIZE,
            });
        }
        let ascending = mu.iter().tuple_windows().all(|(a, b)| a <= b);
        let descending = mu.iter().tuple_windows().all(|(a, b)| a >= b);
        if !(ascending || descending) {
            return Err(ProfileLibraryError::NonMonotonicGrid);
        }

        let mu = mu.as_standard_layout().into_owned();
        let z = z.as_standard_layout().into_owned();
        let profiles = profiles.as_standard_layout().into_owned();
        let mean_profiles = profiles
            .mean_axis(Axis(1))
            .ok_or(ProfileLibraryError::Empty)?;

        let z_slice = z.as_slice().expect("standard layout array is contiguous");
        let coefficients = Array2::from_shape_fn((n_passbands, n_samples), |(i_pb, i_s)| {
            disk_coefficient(
                z_slice,
                profiles
                    .slice(s![i_pb, i_s, ..])
                    .to_slice()
                    .expect("standard layout array is contiguous"),
            )
        });
        let mean_coefficients = mean_profiles
            .outer_iter()
            .map(|profile| {
                disk_coefficient(
                    z_slice,
                    profile
                        .to_slice()
                        .expect("standard layout array is contiguous"),
                )
            })
            .collect();

        debug!(
            "profile library: {} passbands, {} samples, {} grid points",
            n_passbands, n_samples, grid_size
        );

        Ok(Self {
            passbands,
            mu,
            z,
            profiles,
            mean_profiles,
            coefficients,
            mean_coefficients,
        })
    }

    pub fn passbands(&self) -> &[Passband] {
        &self.passbands
    }

    pub fn n_passbands(&self) -> usize {
        self.passbands.len()
    }

    pub fn n_samples(&self) -> usize {
        self.profiles.len_of(Axis(1))
    }

    pub fn grid_size(&self) -> usize {
        self.mu.len()
    }

    pub fn mu(&self) -> ArrayView1<'_, f64> {
        self.mu.view()
    }

    pub fn z(&self) -> ArrayView1<'_, f64> {
        self.z.view()
    }

    pub fn mu_slice(&self) -> &[f64] {
        self.mu.as_slice().expect("standard layout array is contiguous")
    }

    pub fn profiles(&self) -> ArrayView3<'_, f64> {
        self.profiles.view()
    }

    pub fn mean_profiles(&self) -> ArrayView2<'_, f64> {
        self.mean_profiles.view()
    }

    /// Intensity profile of the given sample, panics if indexes are out of bounds
    pub fn profile(&self, passband: usize, sample: usize) -> &[f64] {
        self.profiles
            .slice(s![passband, sample, ..])
            .to_slice()
            .expect("standard layout array is contiguous")
    }

    /// Mean intensity profile, panics if index is out of bounds
    pub fn mean_profile(&self, passband: usize) -> &[f64] {
        self.mean_profiles
            .slice(s![passband, ..])
            .to_slice()
            .expect("standard layout array is contiguous")
    }

    /// [disk_coefficient] of the given sample profile
    pub fn coefficient(&self, passband: usize, sample: usize) -> f64 {
        self.coefficients[[passband, sample]]
    }

    /// [disk_coefficient] of the mean profile
    pub fn mean_coefficient(&self, passband: usize) -> f64 {
        self.mean_coefficients[passband]
    }

    /// Sub-library with the given passbands, in the given order, and the first `n_samples`
    /// samples
    pub fn select(
        &self,
        passbands: &[Passband],
        n_samples: usize,
    ) -> Result<Self, ProfileSourceError> {
        if n_samples > self.n_samples() {
            return Err(ProfileSourceError::InsufficientSamples {
                requested: n_samples,
                available: self.n_samples(),
            });
        }
        let indices = passbands
            .iter()
            .map(|passband| {
                self.passbands
                    .iter()
                    .position(|p| p == passband)
                    .ok_or_else(|| ProfileSourceError::MissingPassband(passband.name().into()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let profiles = self
            .profiles
            .select(Axis(0), &indices)
            .slice_move(s![.., ..n_samples, ..]);
        Ok(Self::new(
            passbands.to_vec(),
            self.mu.clone(),
            self.z.clone(),
            profiles,
        )?)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename = "ProfileLibrary")]
struct ProfileLibraryParameters {
    passbands: Vec<Passband>,
    mu: Array1<f64>,
    z: Array1<f64>,
    profiles: Array3<f64>,
}

impl From<ProfileLibrary> for ProfileLibraryParameters {
    fn from(f: ProfileLibrary) -> Self {
        Self {
            passbands: f.passbands,
            mu: f.mu,
            z: f.z,
            profiles: f.profiles,
        }
    }
}

impl TryFrom<ProfileLibraryParameters> for ProfileLibrary {
    type Error = ProfileLibraryError;

    fn try_from(p: ProfileLibraryParameters) -> Result<Self, Self::Error> {
        Self::new(p.passbands, p.mu, p.z, p.profiles)
    }
}
