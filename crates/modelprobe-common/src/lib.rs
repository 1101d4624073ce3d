pub mod config;
pub mod model_id;
pub mod outcome;
pub mod payload;
pub mod run_result;

pub use config::{CatalogSource, ConfigError, PathConvention, ProbeConfig};
pub use model_id::ModelId;
pub use outcome::ProbeOutcome;
pub use payload::PayloadTemplate;
pub use run_result::{RunResult, RunStats};

pub mod telemetry;
