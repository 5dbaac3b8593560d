mod error;
mod target;
mod target_state;

pub use error::*;
pub use target::*;
pub use target_state::*;
