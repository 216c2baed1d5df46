use crate::cli::Cli;
use crate::error::{CliError, Result};
use dbanneal::core::models::problem::{PARAMETER_DEFAULTS, Problem};
use dbanneal::engine::config::SEED;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const SIM_PARAMS_PREFIX: &str = "sim-params.";

/// Parameter overrides read from a `--config` TOML file.
///
/// ```toml
/// seed = 42
///
/// [sim-params]
/// anneal_cycles = 5000
/// debye_length = "5e-9"
/// ```
///
/// Values under `[sim-params]` may be integers, floats or strings; they are
/// handed to the engine as text, like the design's own `<sim_params>`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    seed: Option<u64>,
    #[serde(rename = "sim-params", default)]
    sim_params: BTreeMap<String, toml::Value>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `--set` values, then `--seed`, on top of the file contents.
    pub fn merge_with_cli(mut self, args: &Cli) -> Result<Self> {
        self.apply_set_values(&args.set_values)?;
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        Ok(self)
    }

    /// Writes every override into the problem's parameter table, replacing
    /// values read from the design.
    pub fn apply_to(&self, problem: &mut Problem) -> Result<()> {
        for (key, value) in &self.sim_params {
            let text = value_to_text(key, value)?;
            debug!(key = %key, value = %text, "Overriding simulation parameter");
            problem.set_parameter(key.as_str(), text);
        }
        if let Some(seed) = self.seed {
            problem.set_parameter(SEED, seed.to_string());
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        match self.sim_params.keys().find(|k| !is_known_parameter(k)) {
            Some(key) => Err(unknown_parameter(key)),
            None => Ok(()),
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            if key == SEED {
                self.seed = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            } else if let Some(param) = key.strip_prefix(SIM_PARAMS_PREFIX) {
                if !is_known_parameter(param) {
                    return Err(unknown_parameter(param));
                }
                self.sim_params
                    .insert(param.to_string(), toml::Value::String(value_str.to_string()));
            } else {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
        Ok(())
    }
}

fn is_known_parameter(key: &str) -> bool {
    PARAMETER_DEFAULTS.contains_key(key)
}

fn unknown_parameter(key: &str) -> CliError {
    CliError::Config(format!("Unknown simulation parameter '{}'", key))
}

fn value_to_text(key: &str, value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        other => Err(CliError::Config(format!(
            "Parameter '{}' must be a number or a string, found {}",
            key,
            other.type_str()
        ))),
    }
}
