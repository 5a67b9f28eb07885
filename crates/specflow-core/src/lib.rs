pub mod artifact;
pub mod config;
pub mod context;
pub mod docs;
pub mod error;
pub mod feature;
pub mod git;
pub mod history;
pub mod io;
pub mod paths;
pub mod resolver;
pub mod types;
pub mod validate;

pub use error::{Result, SpecflowError};
