use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Named photometric passband
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Passband {
    name: String,
}

impl Passband {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// TESS broad red-optical passband
    pub fn tess() -> Self {
        Self::new("TESS")
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Passband {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
