use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// How outbound Google API calls obtain their bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcpAuthMode {
    /// Fetch tokens from the instance metadata server (Cloud Run, Cloud Functions, GCE)
    Metadata,
    /// Use a pre-issued token from `GOOGLE_OAUTH_ACCESS_TOKEN`
    Static,
    /// Send no Authorization header (local emulators)
    None,
}

impl FromStr for GcpAuthMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metadata" => Ok(GcpAuthMode::Metadata),
            "static" => Ok(GcpAuthMode::Static),
            "none" => Ok(GcpAuthMode::None),
            _ => Err(anyhow::anyhow!("Invalid GCP auth mode: {}", s)),
        }
    }
}

impl Display for GcpAuthMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            GcpAuthMode::Metadata => write!(f, "metadata"),
            GcpAuthMode::Static => write!(f, "static"),
            GcpAuthMode::None => write!(f, "none"),
        }
    }
}
