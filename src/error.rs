/// Error returned from [crate::TimeBinner] and [crate::PhaseFolder]
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BinningError {
    #[error("bin width must be a positive finite number, {width} is given")]
    InvalidWidth { width: f64 },

    #[error("period must be a positive finite number, {period} is given")]
    InvalidPeriod { period: f64 },

    #[error("time range [{min}, {max}] is not finite")]
    NonFiniteTimeRange { min: f64, max: f64 },

    #[error("time range {duration} split by width {width} gives too many bins")]
    TooManyBins { duration: f64, width: f64 },
}

/// Error returned when a [crate::ProfileLibrary] is built from inconsistent arrays
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileLibraryError {
    #[error("profile library must contain at least one passband and one sample")]
    Empty,

    #[error("profile grid has {actual} points, at least {minimum} are required")]
    ShortGrid { actual: usize, minimum: usize },

    #[error("mu grid has {mu} points, z grid has {z} points, profiles have {profiles} points")]
    GridSizeMismatch { mu: usize, z: usize, profiles: usize },

    #[error("{passbands} passbands are given for {profiles} profile sets")]
    PassbandCountMismatch { passbands: usize, profiles: usize },

    #[error("mu grid must be monotonic")]
    NonMonotonicGrid,
}

/// Error returned from a [crate::ProfileSource] or [crate::ProfileService]
#[derive(Debug, thiserror::Error)]
pub enum ProfileSourceError {
    #[error("{capability} is unavailable: {reason}")]
    Unavailable {
        capability: &'static str,
        reason: String,
    },

    #[error("no profiles available for passband {0:?}")]
    MissingPassband(String),

    #[error("{requested} profile samples requested, only {available} available")]
    InsufficientSamples { requested: usize, available: usize },

    #[error(transparent)]
    Library(#[from] ProfileLibraryError),

    #[error("profile generation failed: {0}")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error returned from [crate::LdModelTrait] methods
#[derive(Debug, thiserror::Error)]
pub enum LdModelError {
    #[error("mu grid must be non-empty")]
    EmptyGrid,

    #[error("integration grid has {actual} points, at least {minimum} are required")]
    GridTooSmall { actual: usize, minimum: usize },

    #[error("parameter vector has {actual} values, {expected} are expected")]
    ParameterShape { actual: usize, expected: usize },

    #[error("{model} limb darkening model doesn't support {operation}")]
    NotSupported {
        model: &'static str,
        operation: &'static str,
    },

    #[error(transparent)]
    ProfileSource(#[from] ProfileSourceError),
}

impl From<ProfileLibraryError> for LdModelError {
    fn from(error: ProfileLibraryError) -> Self {
        ProfileSourceError::from(error).into()
    }
}
