mod executor;
mod manifest;
mod orchestrator;
mod report;
mod signal;
mod sink;
mod types;

pub use executor::*;
pub use manifest::*;
pub use orchestrator::*;
pub use report::*;
pub use signal::*;
pub use sink::*;
pub use types::*;

pub type Result<T> = std::result::Result<T, Error>;
