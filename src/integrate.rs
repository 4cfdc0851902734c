//! Trapezoidal-rule integration

use crate::float_trait::Float;

/// Integrate `y(x)` with the trapezoidal rule
///
/// $$
/// \int y\,dx \approx \sum_{i=1}^{n-1} (x_i - x_{i-1}) \frac{y_i + y_{i-1}}{2}.
/// $$
///
/// `x` is expected to be monotonic, the result is negative for a descending `x`. Arrays shorter
/// than two points give zero. Panics if `x` and `y` have different lengths.
pub fn trapz<T>(x: &[T], y: &[T]) -> T
where
    T: Float,
{
    assert_eq!(x.len(), y.len(), "x and y should have the same size");
    x.windows(2)
        .zip(y.windows(2))
        .fold(T::zero(), |acc, (x, y)| {
            acc + (x[1] - x[0]) * T::half() * (y[1] + y[0])
        })
}

/// Integrate `w(x) * y(x)` with the trapezoidal rule without allocating the product array
///
/// Panics if the arrays have different lengths.
pub fn trapz_weighted<T>(x: &[T], w: &[T], y: &[T]) -> T
where
    T: Float,
{
    assert_eq!(x.len(), w.len(), "x and w should have the same size");
    assert_eq!(x.len(), y.len(), "x and y should have the same size");
    (1..x.len()).fold(T::zero(), |acc, i| {
        acc + (x[i] - x[i - 1]) * T::half() * (w[i] * y[i] + w[i - 1] * y[i - 1])
    })
}
