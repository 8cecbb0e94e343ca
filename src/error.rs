use thiserror::Error;

use crate::candidate::Candidate;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("unknown benchmark case `{0}`")]
    UnknownCase(String),

    #[error("case `{case}` failed on {candidate}")]
    CaseFailed {
        case: String,
        candidate: Candidate,
        #[source]
        source: Box<BenchError>,
    },

    #[error("{candidate} does not support {capability}")]
    MissingCapability {
        candidate: Candidate,
        capability: &'static str,
    },

    #[error(transparent)]
    Map(#[from] MapError),

    #[error("invalid timing configuration: {0}")]
    InvalidTiming(String),

    #[error("invalid discovery configuration: {0}")]
    InvalidDiscovery(String),

    #[error("case `{case}` took no measurable time on the reference candidate")]
    ZeroReference { case: String },

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map is empty")]
    Empty,

    #[error("index {index} out of range for map of length {len}")]
    IndexOutOfRange { index: isize, len: usize },
}
