use std::{fs, path::Path};

use log::debug;
use serde_yaml::Value;
use thiserror::Error;
use undercloud_wizard_core::settings::Overrides;

use crate::cli::PlanArgs;

#[derive(Debug, Error)]
pub enum OverridesFileError {
    #[error("Io error: {}", .0)]
    IoError(std::io::Error),
    #[error("Deserialization error: {}", .0)]
    DeserializationError(serde_yaml::Error),
    #[error("The overrides file must contain a mapping!")]
    NotAMapping,
    #[error("Overrides file keys must be strings!")]
    InvalidKey,
    #[error("Value of '{}' must be a scalar!", .0)]
    InvalidValue(String),
}

pub fn load_overrides_file(path: &Path) -> Result<Overrides, OverridesFileError> {
    debug!("Used overrides file: {path:?}");

    let contents = fs::read_to_string(path).map_err(OverridesFileError::IoError)?;

    parse_overrides(&contents)
}

/// Reads a YAML mapping of raw params. Scalars are stringified, nulls count as unset.
pub fn parse_overrides(contents: &str) -> Result<Overrides, OverridesFileError> {
    if contents.trim().is_empty() {
        return Ok(Overrides::default());
    }

    let document: Value =
        serde_yaml::from_str(contents).map_err(OverridesFileError::DeserializationError)?;
    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(Overrides::default()),
        _ => return Err(OverridesFileError::NotAMapping),
    };

    let mut params = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key = match key {
            Value::String(key) => key,
            _ => return Err(OverridesFileError::InvalidKey),
        };
        let value = match value {
            Value::Null => String::new(),
            Value::Bool(value) => value.to_string(),
            Value::Number(value) => value.to_string(),
            Value::String(value) => value,
            _ => return Err(OverridesFileError::InvalidValue(key)),
        };

        params.push((key, value));
    }

    Ok(Overrides::from_params(params))
}

/// Layers the override sources: file, then `--set` params, then the dedicated flags.
pub fn collect_overrides(args: &PlanArgs) -> Result<Overrides, OverridesFileError> {
    let from_file = match &args.overrides_file {
        Some(path) => load_overrides_file(path)?,
        None => Overrides::default(),
    };
    let from_params = Overrides::from_params(args.set.iter().map(|(k, v)| (k, v)));
    let from_flags = Overrides {
        hostname: args.hostname.clone(),
        local_interface: args.local_interface.clone(),
        network_cidr: args.network_cidr.clone(),
        node_count: args.node_count.clone(),
    };

    Ok(from_file.merge(from_params).merge(from_flags))
}
