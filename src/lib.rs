pub mod config;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod rename;
pub mod table;
pub mod verify;

pub use config::Config;
pub use error::StageError;
