use crate::data::TimeSeries;
use crate::error::BinningError;
use crate::float_trait::Float;

use conv::prelude::*;
use itertools::Itertools;
use macro_const::macro_const;
use ndarray::Array1;
use num_traits::NumCast;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_const! {
    const DOC: &str = r"
Fixed-width time binning

Time series is split into $N = \lceil (t_\mathrm{max} - t_\mathrm{min}) / \Delta \rceil$ bins
(at least one bin for a non-empty time series) of width $\Delta$ with edges
$e_j = t_\mathrm{min} + j \Delta$. Each observation goes to the bin with the greatest edge
$e_j \leq t_i$, so observations lying on or after the last edge belong to the last bin. Time
series is not required to be sorted.

For every non-empty bin the mean time, the mean value and the standard error
$$
\delta_j = \frac{\sigma_j}{\sqrt{N_j}},
$$
are computed, where $\sigma_j$ is the standard deviation of the bin values normalised by
$N_j$, the number of observations in the bin. The error is undefined (NaN) for bins with
$N_j \leq 2$, such bins are dropped from the binned time series together with empty ones.

Non-finite times and time series requiring more than [TimeBinner::MAX_BINS] bins are
rejected with an error.
";
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "TimeBinnerParameters", into = "TimeBinnerParameters")]
pub struct TimeBinner {
    width: f64,
}

impl TimeBinner {
    /// Upper limit on the number of bins of a single time series
    pub const MAX_BINS: usize = 1 << 24;

    /// New binner, `width` must be positive and finite
    pub fn new(width: f64) -> Result<Self, BinningError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(BinningError::InvalidWidth { width });
        }
        Ok(Self { width })
    }

    pub fn set_width(&mut self, width: f64) -> Result<&mut Self, BinningError> {
        *self = Self::new(width)?;
        Ok(self)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn default_width() -> f64 {
        1.0
    }

    pub const fn doc() -> &'static str {
        DOC
    }

    fn width_as<T: Float>(&self) -> Result<T, BinningError> {
        <T as NumCast>::from(self.width)
            .filter(|width: &T| width.is_finite() && *width > T::zero())
            .ok_or(BinningError::InvalidWidth { width: self.width })
    }

    fn bin_count<T: Float>(
        &self,
        t: &[T],
        t_min: T,
        t_max: T,
        width: T,
    ) -> Result<usize, BinningError> {
        // min and max skip NaN unless it is the first value
        if !t.iter().all(|t| t.is_finite()) {
            return Err(BinningError::NonFiniteTimeRange {
                min: t_min.to_f64().unwrap_or(f64::NAN),
                max: t_max.to_f64().unwrap_or(f64::NAN),
            });
        }
        let duration = t_max - t_min;
        let n = (duration / width)
            .ceil()
            .to_usize()
            .filter(|&n| n <= Self::MAX_BINS)
            .ok_or(BinningError::TooManyBins {
                duration: duration.to_f64().unwrap_or(f64::NAN),
                width: self.width,
            })?;
        Ok(usize::max(n, 1))
    }

    /// All bins including empty and degenerate ones, in time order
    pub fn bins<T>(&self, ts: &mut TimeSeries<T>) -> Result<Vec<Bin<T>>, BinningError>
    where
        T: Float,
    {
        let Some((t_min, t_max)) = ts.time_range() else {
            return Ok(vec![]);
        };
        let width = self.width_as::<T>()?;
        let n_bins = self.bin_count(ts.t.as_slice(), t_min, t_max, width)?;

        let edges: Vec<T> = (0..n_bins)
            .map(|i| t_min + width * i.approx_as::<T>().unwrap())
            .collect();
        let mut accumulators = vec![BinAccumulator::default(); n_bins];
        for (&t, &m) in ts.t.as_slice().iter().zip(ts.m.as_slice()) {
            // Number of edges not greater than t, it is positive because edges[0] == min(t)
            let i = edges.partition_point(|&edge| edge <= t).saturating_sub(1);
            accumulators[i].push(t, m);
        }

        Ok(edges
            .into_iter()
            .zip(accumulators)
            .map(|(edge, acc)| acc.into_bin(edge))
            .collect())
    }

    /// Binned time series, only bins with a finite standard error are kept
    pub fn bin<T>(&self, ts: &mut TimeSeries<T>) -> Result<BinnedTimeSeries<T>, BinningError>
    where
        T: Float,
    {
        let (t, m, err): (Vec<_>, Vec<_>, Vec<_>) = self
            .bins(ts)?
            .into_iter()
            .filter(|bin| bin.std_error.is_finite())
            .map(|bin| (bin.mean_time, bin.mean_value, bin.std_error))
            .multiunzip();
        Ok(BinnedTimeSeries {
            t: t.into(),
            m: m.into(),
            err: err.into(),
        })
    }
}

impl Default for TimeBinner {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "TimeBinner")]
pub struct TimeBinnerParameters {
    pub width: f64,
}

impl From<TimeBinner> for TimeBinnerParameters {
    fn from(f: TimeBinner) -> Self {
        Self { width: f.width }
    }
}

impl TryFrom<TimeBinnerParameters> for TimeBinner {
    type Error = BinningError;

    fn try_from(p: TimeBinnerParameters) -> Result<Self, Self::Error> {
        Self::new(p.width)
    }
}

/// A single time bin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin<T> {
    /// Left edge of the bin
    pub edge_start: T,
    /// Number of observations in the bin
    pub count: usize,
    /// NaN for an empty bin
    pub mean_time: T,
    /// NaN for an empty bin
    pub mean_value: T,
    /// NaN for bins with two observations or less
    pub std_error: T,
}

/// Output of [TimeBinner::bin]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(bound = "T: Float")]
pub struct BinnedTimeSeries<T> {
    pub t: Array1<T>,
    pub m: Array1<T>,
    pub err: Array1<T>,
}

impl<T> BinnedTimeSeries<T> {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

// Welford's online algorithm
#[derive(Clone, Copy, Debug)]
struct BinAccumulator<T> {
    count: usize,
    mean_t: T,
    mean_m: T,
    m2: T,
}

impl<T> Default for BinAccumulator<T>
where
    T: Float,
{
    fn default() -> Self {
        Self {
            count: 0,
            mean_t: T::zero(),
            mean_m: T::zero(),
            m2: T::zero(),
        }
    }
}

impl<T> BinAccumulator<T>
where
    T: Float,
{
    fn push(&mut self, t: T, m: T) {
        self.count += 1;
        let n: T = self.count.approx_as::<T>().unwrap();
        self.mean_t += (t - self.mean_t) / n;
        let delta = m - self.mean_m;
        self.mean_m += delta / n;
        self.m2 += delta * (m - self.mean_m);
    }

    fn into_bin(self, edge_start: T) -> Bin<T> {
        let (mean_time, mean_value) = if self.count == 0 {
            (T::nan(), T::nan())
        } else {
            (self.mean_t, self.mean_m)
        };
        let std_error = if self.count > 2 {
            let n: T = self.count.approx_as::<T>().unwrap();
            (self.m2 / n).sqrt() / n.sqrt()
        } else {
            T::nan()
        };
        Bin {
            edge_start,
            count: self.count,
            mean_time,
            mean_value,
            std_error,
        }
    }
}
