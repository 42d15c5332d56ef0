pub mod config;
pub mod log;
pub mod raw;
pub mod reports;
pub mod sources;
pub mod status;

pub use config::*;
pub use log::*;
pub use raw::*;
pub use reports::*;
pub use sources::*;
pub use status::*;
