pub mod api;
pub mod config;
pub mod contacts;
pub mod error;
pub mod forms;
pub mod session;
pub mod utils;

pub use error::{Error, Result};
