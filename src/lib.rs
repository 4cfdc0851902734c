#![doc = include_str!("../README.md")]

mod binning;
pub use binning::{Bin, BinnedTimeSeries, TimeBinner, TimeBinnerParameters};

mod data;
pub use data::{DataSample, TimeSeries};

mod error;
pub use error::{BinningError, LdModelError, ProfileLibraryError, ProfileSourceError};

mod float_trait;
pub use float_trait::Float;

mod folding;
pub use folding::{PhaseFolder, PhaseFolderParameters};

pub mod integrate;
pub use integrate::{trapz, trapz_weighted};

pub mod interpolate;
pub use interpolate::interp;

pub mod ld_model;
pub use ld_model::{
    IntegrationGrid, LdEvaluation, LdLaw, LdModel, LdModelTrait, ParametricLdModel,
    SampledLdModel,
};

pub mod profiles;
pub use profiles::{
    ParameterEstimate, Passband, PrecomputedProfileSource, ProfileLibrary, ProfileRequest,
    ProfileService, ProfileSource, StellarParameters,
};

mod types;

pub use ndarray;
