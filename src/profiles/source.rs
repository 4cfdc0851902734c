use crate::error::ProfileSourceError;
use crate::profiles::library::ProfileLibrary;
use crate::profiles::passband::Passband;

use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

/// Measured value with its uncertainty
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterEstimate {
    pub value: f64,
    pub uncertainty: f64,
}

impl ParameterEstimate {
    pub fn new(value: f64, uncertainty: f64) -> Self {
        Self { value, uncertainty }
    }
}

impl From<(f64, f64)> for ParameterEstimate {
    fn from((value, uncertainty): (f64, f64)) -> Self {
        Self::new(value, uncertainty)
    }
}

/// Stellar parameter distributions profile generation is conditioned on
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StellarParameters {
    /// Effective temperature, K
    pub teff: ParameterEstimate,
    /// Surface gravity, log10(g / (cm s^-2))
    pub logg: ParameterEstimate,
    /// Metallicity, [Fe/H]
    pub metallicity: ParameterEstimate,
}

impl StellarParameters {
    pub fn new(
        teff: impl Into<ParameterEstimate>,
        logg: impl Into<ParameterEstimate>,
        metallicity: impl Into<ParameterEstimate>,
    ) -> Self {
        Self {
            teff: teff.into(),
            logg: logg.into(),
            metallicity: metallicity.into(),
        }
    }
}

/// Request for a [ProfileLibrary]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProfileRequest {
    pub stellar: StellarParameters,
    pub passbands: Vec<Passband>,
    #[serde(default = "ProfileRequest::default_n_samples")]
    pub n_samples: usize,
    /// Cache location, its layout is up to the [ProfileSource]
    #[serde(default)]
    pub cache: Option<PathBuf>,
}

impl ProfileRequest {
    pub fn new(stellar: StellarParameters, passbands: Vec<Passband>) -> Self {
        Self {
            stellar,
            passbands,
            n_samples: Self::default_n_samples(),
            cache: None,
        }
    }

    pub fn set_n_samples(&mut self, n_samples: usize) -> &mut Self {
        self.n_samples = n_samples;
        self
    }

    pub fn set_cache(&mut self, cache: impl Into<PathBuf>) -> &mut Self {
        self.cache = Some(cache.into());
        self
    }

    #[inline]
    pub fn default_n_samples() -> usize {
        500
    }
}

/// Provider of stellar limb-darkening profile libraries
///
/// Implementations are usually backed by a stellar-atmosphere model grid and are expensive to
/// call, a library is expected to be requested once per fitting session.
pub trait ProfileSource: Debug + Send + Sync {
    fn create_profiles(&self, request: &ProfileRequest)
    -> Result<ProfileLibrary, ProfileSourceError>;
}

/// [ProfileSource] serving requests from an already computed library
#[derive(Clone, Debug)]
pub struct PrecomputedProfileSource {
    library: ProfileLibrary,
}

impl PrecomputedProfileSource {
    pub fn new(library: ProfileLibrary) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &ProfileLibrary {
        &self.library
    }
}

impl ProfileSource for PrecomputedProfileSource {
    fn create_profiles(
        &self,
        request: &ProfileRequest,
    ) -> Result<ProfileLibrary, ProfileSourceError> {
        debug!(
            "selecting {} samples for passbands {:?} from a precomputed library",
            request.n_samples, request.passbands
        );
        self.library.select(&request.passbands, request.n_samples)
    }
}

/// Profile generation capability, resolved once at start-up
///
/// When no [ProfileSource] is available every request fails with
/// [ProfileSourceError::Unavailable], there is no fallback to default profiles.
#[derive(Clone, Debug)]
pub enum ProfileService {
    Available(Arc<dyn ProfileSource>),
    Unavailable { reason: String },
}

impl ProfileService {
    pub const CAPABILITY: &'static str = "limb darkening profile generation";

    pub fn new(source: impl ProfileSource + 'static) -> Self {
        Self::Available(Arc::new(source))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn from_source(source: Option<Arc<dyn ProfileSource>>) -> Self {
        match source {
            Some(source) => Self::Available(source),
            None => Self::unavailable("no profile source is configured"),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn create_profiles(
        &self,
        request: &ProfileRequest,
    ) -> Result<ProfileLibrary, ProfileSourceError> {
        match self {
            Self::Available(source) => {
                let library = source.create_profiles(request)?;
                if library.passbands() != request.passbands.as_slice() {
                    return Err(ProfileSourceError::MissingPassband(
                        request
                            .passbands
                            .iter()
                            .find(|passband| !library.passbands().contains(passband))
                            .map_or_else(
                                || format!("{:?}", request.passbands),
                                |passband| passband.name().into(),
                            ),
                    ));
                }
                Ok(library)
            }
            Self::Unavailable { reason } => Err(ProfileSourceError::Unavailable {
                capability: Self::CAPABILITY,
                reason: reason.clone(),
            }),
        }
    }
}
