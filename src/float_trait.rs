use conv::prelude::*;
use ndarray::NdFloat;
use num_traits::FloatConst;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::iter::Sum;

/// Floating point type used by the time-series routines, implemented for `f32` and `f64`
pub trait Float:
    'static + Sized + NdFloat + FloatConst + ApproxFrom<usize> + Sum + Serialize + DeserializeOwned
{
    fn half() -> Self;

    fn two() -> Self;
}

macro_rules! float_impl {
    ($t: ty) => {
        impl Float for $t {
            #[inline]
            fn half() -> Self {
                0.5
            }

            #[inline]
            fn two() -> Self {
                2.0
            }
        }
    };
}

float_impl!(f32);
float_impl!(f64);
