mod library;
pub use library::{ProfileLibrary, disk_coefficient};

mod passband;
pub use passband::Passband;

mod source;
pub use source::{
    ParameterEstimate, PrecomputedProfileSource, ProfileRequest, ProfileService, ProfileSource,
    StellarParameters,
};
