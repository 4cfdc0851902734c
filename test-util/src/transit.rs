use light_curve_transit::TimeSeries;
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

/// Box-shaped transit of a dark body over a uniform star
#[derive(Clone, Copy, Debug)]
pub struct SyntheticTransit {
    pub period: f64,
    pub epoch: f64,
    /// Full transit duration
    pub duration: f64,
    /// Relative flux decrement
    pub depth: f64,
}

impl SyntheticTransit {
    /// Noiseless normalised flux
    pub fn flux(&self, t: f64) -> f64 {
        let dt = (t - self.epoch) / self.period;
        let dt = (dt - dt.round()) * self.period;
        if dt.abs() < 0.5 * self.duration {
            1.0 - self.depth
        } else {
            1.0
        }
    }

    /// Irregularly sampled observations: `n` uniformly distributed unsorted times over
    /// `[t_min, t_max)` and fluxes with Gaussian noise of `sigma`
    pub fn sample(
        &self,
        rng: &mut impl Rng,
        n: usize,
        t_min: f64,
        t_max: f64,
        sigma: f64,
    ) -> (Vec<f64>, Vec<f64>) {
        let times = Uniform::new(t_min, t_max).unwrap();
        let noise = Normal::new(0.0, sigma).unwrap();
        (0..n)
            .map(|_| {
                let t = times.sample(rng);
                (t, self.flux(t) + noise.sample(rng))
            })
            .unzip()
    }
}

pub fn noisy_transit_ts(
    transit: &SyntheticTransit,
    rng: &mut impl Rng,
    n: usize,
    t_min: f64,
    t_max: f64,
    sigma: f64,
) -> TimeSeries<'static, f64> {
    let (t, m) = transit.sample(rng, n, t_min, t_max, sigma);
    TimeSeries::new(t, m)
}
