mod archiver;
mod command;
mod executor;

pub use archiver::*;
pub use command::*;
pub use executor::*;
