//! Command implementations.

pub mod attribute;
pub mod finalize;
pub mod qualitative;
pub mod run;

pub use self::attribute::execute_attribute;
pub use self::finalize::execute_finalize;
pub use self::qualitative::execute_qualitative;
pub use self::run::execute_run;

use crate::error::{CliError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};

/// Read a JSON request from a file, or from stdin when `input` is `-`.
pub fn read_request<T: DeserializeOwned>(input: &str) -> Result<T> {
    let json_data = if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    if json_data.trim().is_empty() {
        return Err(CliError::InvalidInput(format!("No request found in '{}'", input)));
    }

    Ok(serde_json::from_str(&json_data)?)
}
