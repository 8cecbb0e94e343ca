pub mod candidate;
pub mod cases;
pub mod clock;
pub mod config;
pub mod error;
pub mod maps;
pub mod registry;
pub mod report;
pub mod runner;
pub mod timer;

pub use candidate::Candidate;
pub use config::BenchConfig;
pub use error::{BenchError, MapError};
pub use registry::Registry;
pub use runner::Runner;
