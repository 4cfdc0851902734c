use crate::binning::{BinnedTimeSeries, TimeBinner};
use crate::data::TimeSeries;
use crate::error::BinningError;
use crate::float_trait::Float;

use itertools::Itertools;
use num_traits::NumCast;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Phase folding with a known orbital period and a reference transit epoch
///
/// Phase is defined as
/// $$
/// \phi = \mathrm{frac}\left(\frac{t - t_0}{P} + s\right) \in [0, 1),
/// $$
/// where $t_0$ is the reference epoch, $P$ is the period and $s$ is the phase shift. With the
/// default shift of one half the transit is placed at the centre of the phase interval.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "PhaseFolderParameters", into = "PhaseFolderParameters")]
pub struct PhaseFolder {
    period: f64,
    epoch: f64,
    shift: f64,
}

impl PhaseFolder {
    pub fn new(period: f64, epoch: f64) -> Result<Self, BinningError> {
        if !(period.is_finite() && period > 0.0) {
            return Err(BinningError::InvalidPeriod { period });
        }
        Ok(Self {
            period,
            epoch,
            shift: Self::default_shift(),
        })
    }

    pub fn set_shift(&mut self, shift: f64) -> &mut Self {
        self.shift = shift;
        self
    }

    #[inline]
    pub fn default_shift() -> f64 {
        0.5
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    fn parameters_as<T: Float>(&self) -> (T, T, T) {
        let cast = |x: f64| <T as NumCast>::from(x).unwrap_or_else(T::nan);
        (cast(self.period), cast(self.epoch), cast(self.shift))
    }

    /// Phase in `[0, 1)`
    pub fn phase<T>(&self, t: T) -> T
    where
        T: Float,
    {
        let (period, epoch, shift) = self.parameters_as::<T>();
        let x = (t - epoch) / period + shift;
        let phase = x - x.floor();
        // x - floor(x) may round up to unity for tiny negative x
        if phase >= T::one() { T::zero() } else { phase }
    }

    /// Number of the transit closest to `t`, zero for the reference epoch
    pub fn epoch_number<T>(&self, t: T) -> T
    where
        T: Float,
    {
        let (period, epoch, _) = self.parameters_as::<T>();
        ((t - epoch) / period).round()
    }

    /// Mid-transit time of the transit closest to `t`
    pub fn transit_center<T>(&self, t: T) -> T
    where
        T: Float,
    {
        let (period, epoch, _) = self.parameters_as::<T>();
        epoch + self.epoch_number(t) * period
    }

    /// Fold time series
    ///
    /// Times of the output are $(\phi - s) P$, i.e. time from the transit centre for the default
    /// shift, and observations are sorted by phase.
    pub fn fold<T>(&self, ts: &mut TimeSeries<T>) -> TimeSeries<'static, T>
    where
        T: Float,
    {
        let (period, _, shift) = self.parameters_as::<T>();
        let (t, m): (Vec<_>, Vec<_>) = ts
            .t
            .as_slice()
            .iter()
            .zip(ts.m.as_slice())
            .map(|(&t, &m)| (self.phase(t), m))
            .sorted_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(phase, m)| ((phase - shift) * period, m))
            .unzip();
        TimeSeries::new(t, m)
    }

    /// Fold time series and bin it in the folded time
    ///
    /// `binner` width is in the units of time, not phase.
    pub fn fold_and_bin<T>(
        &self,
        ts: &mut TimeSeries<T>,
        binner: &TimeBinner,
    ) -> Result<BinnedTimeSeries<T>, BinningError>
    where
        T: Float,
    {
        binner.bin(&mut self.fold(ts))
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "PhaseFolder")]
pub struct PhaseFolderParameters {
    pub period: f64,
    pub epoch: f64,
    #[serde(default = "PhaseFolder::default_shift")]
    pub shift: f64,
}

impl From<PhaseFolder> for PhaseFolderParameters {
    fn from(f: PhaseFolder) -> Self {
        Self {
            period: f.period,
            epoch: f.epoch,
            shift: f.shift,
        }
    }
}

impl TryFrom<PhaseFolderParameters> for PhaseFolder {
    type Error = BinningError;

    fn try_from(p: PhaseFolderParameters) -> Result<Self, Self::Error> {
        let mut folder = Self::new(p.period, p.epoch)?;
        folder.set_shift(p.shift);
        Ok(folder)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use light_curve_common::all_close;

    #[test]
    fn phase_range() {
        let folder = PhaseFolder::new(2.0, 1.0).unwrap();
        assert_relative_eq!(folder.phase(1.0_f64), 0.5);
        assert_relative_eq!(folder.phase(2.0_f64), 0.0);
        assert_relative_eq!(folder.phase(-1.5_f64), 0.25);
        for i in -100..100 {
            let phase = folder.phase(0.37 * i as f64);
            assert!((0.0..1.0).contains(&phase));
        }
    }

    #[test]
    fn zero_shift() {
        let mut folder = PhaseFolder::new(3.0, 0.0).unwrap();
        folder.set_shift(0.0);
        assert_relative_eq!(folder.phase(7.5_f64), 0.5, epsilon = 1e-15);
        assert_eq!(folder.phase(6.0_f64), 0.0);
    }

    #[test]
    fn epoch_number_and_transit_center() {
        let folder = PhaseFolder::new(1.5, 10.0).unwrap();
        assert_eq!(folder.epoch_number(10.2_f64), 0.0);
        assert_eq!(folder.epoch_number(13.1_f64), 2.0);
        assert_eq!(folder.epoch_number(8.4_f64), -1.0);
        assert_eq!(folder.transit_center(13.1_f64), 13.0);
    }

    #[test]
    fn fold_sorts_by_phase() {
        let folder = PhaseFolder::new(1.0, 0.0).unwrap();
        let t = [0.1_f64, 1.4, 2.0, 3.3, 4.45];
        let m = [1.0, 2.0, 3.0, 4.0, 5.0];
        let folded = folder.fold(&mut TimeSeries::new(&t, &m));
        // Times from the transit centre are 0.1, 0.4, 0.0, 0.3, 0.45 before sorting
        all_close(
            folded.t.sample.as_slice().unwrap(),
            &[0.0, 0.1, 0.3, 0.4, 0.45],
            1e-12,
        );
        assert_eq!(folded.m.sample.as_slice().unwrap(), &[3.0, 1.0, 4.0, 2.0, 5.0]);
    }

    #[test]
    fn fold_and_bin_stacks_transits() {
        let period = 2.0;
        let folder = PhaseFolder::new(period, 0.5).unwrap();
        // Ten orbits sampled at the same orbital phases, the value depends on the phase only.
        // The earliest point sets bin edges half-way between the sampled phases.
        let (t, m): (Vec<f64>, Vec<f64>) = (0..10)
            .flat_map(|orbit| {
                (0..21).map(move |i| {
                    let dt = if i == 20 {
                        -0.999
                    } else {
                        -1.0 + 0.1 * i as f64 + 0.05
                    };
                    let value = if dt.abs() < 0.2 { 0.99 } else { 1.0 };
                    (0.5 + orbit as f64 * period + dt, value)
                })
            })
            .unzip();
        let binner = TimeBinner::new(0.1).unwrap();
        let binned = folder
            .fold_and_bin(&mut TimeSeries::new(t, m), &binner)
            .unwrap();
        assert_eq!(binned.len(), 20);
        for ((&t, &m), &err) in binned.t.iter().zip(binned.m.iter()).zip(binned.err.iter()) {
            let desired = if t.abs() < 0.2 { 0.99 } else { 1.0 };
            assert_relative_eq!(m, desired, epsilon = 1e-12);
            assert!(err < 1e-12);
        }
    }

    #[test]
    fn invalid_period() {
        for period in [0.0, -3.0, f64::NAN] {
            assert!(matches!(
                PhaseFolder::new(period, 0.0),
                Err(BinningError::InvalidPeriod { .. })
            ));
        }
    }

    #[test]
    fn serialization() {
        let folder: PhaseFolder = serde_json::from_str(r#"{"period":3.5,"epoch":1.0}"#).unwrap();
        assert_eq!(folder.shift(), 0.5);
        let json = serde_json::to_string(&folder).unwrap();
        assert_eq!(
            serde_json::from_str::<PhaseFolder>(&json).unwrap(),
            folder
        );
    }
}
