pub use profiles::{
    QuadraticLaw, TESS_KEPLER_PROFILE_LIBRARY, quadratic_profile, quadratic_profile_library,
};
pub use transit::{SyntheticTransit, noisy_transit_ts};

mod profiles;
mod transit;
