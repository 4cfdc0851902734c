use itertools::Itertools;
use lazy_static::lazy_static;
use light_curve_transit::{Passband, ProfileLibrary};
use ndarray::{Array1, Array3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Quadratic-law coefficients with their scatter over library samples
#[derive(Clone, Copy, Debug)]
pub struct QuadraticLaw {
    pub a: f64,
    pub b: f64,
    pub sigma: f64,
}

pub fn quadratic_profile(mu: f64, a: f64, b: f64) -> f64 {
    let x = 1.0 - mu;
    1.0 - a * x - b * x * x
}

/// Library of quadratic-law profiles over ascending `mu`, as stellar-atmosphere libraries are
/// sampled, with the coefficients drawn from independent normal distributions
pub fn quadratic_profile_library(
    rng: &mut impl Rng,
    laws: &[(&str, QuadraticLaw)],
    n_samples: usize,
    grid_size: usize,
) -> ProfileLibrary {
    let mu = Array1::linspace(0.0, 1.0, grid_size);
    let z = mu.mapv(|mu: f64| (1.0 - mu * mu).sqrt());
    let coefficients = laws
        .iter()
        .map(|(_, law)| {
            let normal = Normal::new(0.0, law.sigma).unwrap();
            (0..n_samples)
                .map(|_| (law.a + normal.sample(rng), law.b + normal.sample(rng)))
                .collect_vec()
        })
        .collect_vec();
    let profiles = Array3::from_shape_fn((laws.len(), n_samples, grid_size), |(i_pb, i_s, i)| {
        let (a, b) = coefficients[i_pb][i_s];
        quadratic_profile(mu[i], a, b)
    });
    let passbands = laws
        .iter()
        .map(|&(name, _)| Passband::new(name))
        .collect();
    ProfileLibrary::new(passbands, mu, z, profiles).unwrap()
}

lazy_static! {
    pub static ref TESS_KEPLER_PROFILE_LIBRARY: ProfileLibrary = quadratic_profile_library(
        &mut StdRng::seed_from_u64(0),
        &[
            (
                "TESS",
                QuadraticLaw {
                    a: 0.35,
                    b: 0.22,
                    sigma: 0.02
                }
            ),
            (
                "Kepler",
                QuadraticLaw {
                    a: 0.45,
                    b: 0.20,
                    sigma: 0.02
                }
            ),
        ],
        500,
        100,
    );
}
