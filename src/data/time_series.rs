use crate::data::data_sample::DataSample;
use crate::float_trait::Float;

/// Time series object to be put into [TimeBinner](crate::TimeBinner) or
/// [PhaseFolder](crate::PhaseFolder)
///
/// This struct caches its properties, like the time range, that's why mutable reference is
/// required by the routines consuming it. The data itself is never changed.
#[derive(Clone, Debug)]
pub struct TimeSeries<'a, T>
where
    T: Float,
{
    pub t: DataSample<'a, T>,
    pub m: DataSample<'a, T>,
}

impl<'a, T> TimeSeries<'a, T>
where
    T: Float,
{
    /// Construct `TimeSeries` from array-like objects
    ///
    /// `t` is time, `m` is a measured value, usually normalised flux.
    ///
    /// Both arrays must have the same length. Unlike most light-curve containers `t` is not
    /// required to be sorted. Input arrays could be [`ndarray::Array1`],
    /// [`ndarray::ArrayView1`], 1-D [`ndarray::CowArray`], `Vec<T>` or `&[T]`.
    pub fn new(t: impl Into<DataSample<'a, T>>, m: impl Into<DataSample<'a, T>>) -> Self {
        let t = t.into();
        let m = m.into();

        assert_eq!(
            t.sample.len(),
            m.sample.len(),
            "t and m should have the same size"
        );

        Self { t, m }
    }

    /// Time series length
    #[inline]
    pub fn lenu(&self) -> usize {
        self.t.sample.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lenu() == 0
    }

    /// `(min(t), max(t))`, `None` for an empty time series
    pub fn time_range(&mut self) -> Option<(T, T)> {
        if self.is_empty() {
            return None;
        }
        Some((self.t.get_min(), self.t.get_max()))
    }
}
