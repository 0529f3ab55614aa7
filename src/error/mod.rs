mod types;

pub use types::{NavError, Result};
