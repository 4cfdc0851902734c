//! Piecewise-linear interpolation over monotonic knots

use crate::float_trait::Float;

use ndarray::{ArrayView1, ArrayViewMut1, Zip};

/// Linearly interpolate `fp(xp)` at `x`
///
/// `xp` must be monotonic, either ascending or descending. Outside of the `xp` range the edge
/// value of `fp` is returned, no extrapolation is done. NaN `x` gives NaN.
///
/// Panics if `xp` is empty or `xp` and `fp` have different lengths.
pub fn interp<T>(x: T, xp: &[T], fp: &[T]) -> T
where
    T: Float,
{
    assert_eq!(xp.len(), fp.len(), "xp and fp should have the same size");
    assert!(!xp.is_empty(), "xp must be non-empty");

    let n = xp.len();
    let ascending = xp[0] <= xp[n - 1];
    let (i_lo, i_hi) = if ascending { (0, n - 1) } else { (n - 1, 0) };
    if x.is_nan() {
        return x;
    }
    if x <= xp[i_lo] {
        return fp[i_lo];
    }
    if x >= xp[i_hi] {
        return fp[i_hi];
    }

    // x is strictly inside the grid, so 0 < i < n and xp[i - 1] != xp[i]
    let i = if ascending {
        xp.partition_point(|&knot| knot <= x)
    } else {
        xp.partition_point(|&knot| knot >= x)
    };
    let (x0, x1) = (xp[i - 1], xp[i]);
    let (y0, y1) = (fp[i - 1], fp[i]);
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Interpolate `fp(xp)` at every point of `x` and write the result into `out`
///
/// See [interp] for the boundary policy. Panics if `x` and `out` have different lengths.
pub fn interp_into<T>(mut out: ArrayViewMut1<T>, x: ArrayView1<T>, xp: &[T], fp: &[T])
where
    T: Float,
{
    Zip::from(&mut out)
        .and(&x)
        .for_each(|out, &x| *out = interp(x, xp, fp));
}
