use crate::core::models::problem::{ParameterError, Problem};
use thiserror::Error;

pub const PREANNEAL_CYCLES: &str = "preanneal_cycles";
pub const ANNEAL_CYCLES: &str = "anneal_cycles";
pub const GLOBAL_V0: &str = "global_v0";
pub const DEBYE_LENGTH: &str = "debye_length";
pub const RESULT_QUEUE_SIZE: &str = "result_queue_size";
pub const KT_INIT: &str = "kT_init";
pub const KT_STEP: &str = "kT_step";
pub const V_FREEZE_INIT: &str = "v_freeze_init";
pub const V_FREEZE_STEP: &str = "v_freeze_step";
pub const UNFAV_HOP_SCALE: &str = "unfav_hop_scale";
pub const SEED: &str = "seed";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value {value} for '{key}': must be {requirement}")]
    Invalid {
        key: &'static str,
        value: String,
        requirement: &'static str,
    },

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

/// Cycle counts and the evolution of the two control parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    pub preanneal_cycles: usize,
    pub anneal_cycles: usize,
    /// Initial temperature-like parameter kT, in eV.
    pub kt_init: f64,
    /// Multiplicative decay applied to kT every Annealing cycle.
    pub kt_step: f64,
    pub v_freeze_init: f64,
    /// Additive increment applied to v_freeze every Annealing cycle.
    pub v_freeze_step: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Global bias potential v_0.
    pub global_v0: f64,
    /// Debye screening length λ, in metres.
    pub debye_length: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnealConfig {
    pub schedule: ScheduleConfig,
    pub physics: PhysicsConfig,
    pub result_queue_size: usize,
    pub unfav_hop_scale: f64,
    pub seed: Option<u64>,
}

impl AnnealConfig {
    /// Reads every parameter from the problem, falling back to the built-in
    /// defaults for keys the problem does not set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parameter`] if a value does not parse and
    /// [`ConfigError::Invalid`] if it parses but is out of range.
    pub fn from_problem(problem: &Problem) -> Result<Self, ConfigError> {
        AnnealConfigBuilder::new()
            .preanneal_cycles(problem.parse_parameter(PREANNEAL_CYCLES)?)
            .anneal_cycles(problem.parse_parameter(ANNEAL_CYCLES)?)
            .kt_init(problem.parse_parameter(KT_INIT)?)
            .kt_step(problem.parse_parameter(KT_STEP)?)
            .v_freeze_init(problem.parse_parameter(V_FREEZE_INIT)?)
            .v_freeze_step(problem.parse_parameter(V_FREEZE_STEP)?)
            .global_v0(problem.parse_parameter(GLOBAL_V0)?)
            .debye_length(problem.parse_parameter(DEBYE_LENGTH)?)
            .result_queue_size(problem.parse_parameter(RESULT_QUEUE_SIZE)?)
            .unfav_hop_scale(problem.parse_parameter(UNFAV_HOP_SCALE)?)
            .seed(problem.parse_optional_parameter(SEED)?)
            .build()
    }

    /// Number of configurations the result history can hold: the configured
    /// queue size, clamped to the anneal cycle count.
    pub fn history_capacity(&self) -> usize {
        self.result_queue_size.min(self.schedule.anneal_cycles)
    }

    /// The effective parameters as key/value text, for the result document.
    pub fn parameter_pairs(&self) -> Vec<(String, String)> {
        let s = &self.schedule;
        let mut pairs = vec![
            (PREANNEAL_CYCLES, s.preanneal_cycles.to_string()),
            (ANNEAL_CYCLES, s.anneal_cycles.to_string()),
            (GLOBAL_V0, self.physics.global_v0.to_string()),
            (DEBYE_LENGTH, self.physics.debye_length.to_string()),
            (RESULT_QUEUE_SIZE, self.history_capacity().to_string()),
            (KT_INIT, s.kt_init.to_string()),
            (KT_STEP, s.kt_step.to_string()),
            (V_FREEZE_INIT, s.v_freeze_init.to_string()),
            (V_FREEZE_STEP, s.v_freeze_step.to_string()),
            (UNFAV_HOP_SCALE, self.unfav_hop_scale.to_string()),
        ];
        if let Some(seed) = self.seed {
            pairs.push((SEED, seed.to_string()));
        }
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

#[derive(Default)]
pub struct AnnealConfigBuilder {
    preanneal_cycles: Option<usize>,
    anneal_cycles: Option<usize>,
    kt_init: Option<f64>,
    kt_step: Option<f64>,
    v_freeze_init: Option<f64>,
    v_freeze_step: Option<f64>,
    global_v0: Option<f64>,
    debye_length: Option<f64>,
    result_queue_size: Option<usize>,
    unfav_hop_scale: Option<f64>,
    seed: Option<u64>,
}

impl AnnealConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preanneal_cycles(mut self, cycles: usize) -> Self {
        self.preanneal_cycles = Some(cycles);
        self
    }
    pub fn anneal_cycles(mut self, cycles: usize) -> Self {
        self.anneal_cycles = Some(cycles);
        self
    }
    pub fn kt_init(mut self, kt: f64) -> Self {
        self.kt_init = Some(kt);
        self
    }
    pub fn kt_step(mut self, factor: f64) -> Self {
        self.kt_step = Some(factor);
        self
    }
    pub fn v_freeze_init(mut self, v: f64) -> Self {
        self.v_freeze_init = Some(v);
        self
    }
    pub fn v_freeze_step(mut self, step: f64) -> Self {
        self.v_freeze_step = Some(step);
        self
    }
    pub fn global_v0(mut self, v0: f64) -> Self {
        self.global_v0 = Some(v0);
        self
    }
    pub fn debye_length(mut self, length: f64) -> Self {
        self.debye_length = Some(length);
        self
    }
    pub fn result_queue_size(mut self, size: usize) -> Self {
        self.result_queue_size = Some(size);
        self
    }
    pub fn unfav_hop_scale(mut self, scale: f64) -> Self {
        self.unfav_hop_scale = Some(scale);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<AnnealConfig, ConfigError> {
        let schedule = ScheduleConfig {
            preanneal_cycles: self
                .preanneal_cycles
                .ok_or(ConfigError::MissingParameter(PREANNEAL_CYCLES))?,
            anneal_cycles: self
                .anneal_cycles
                .ok_or(ConfigError::MissingParameter(ANNEAL_CYCLES))?,
            kt_init: self.kt_init.ok_or(ConfigError::MissingParameter(KT_INIT))?,
            kt_step: self.kt_step.ok_or(ConfigError::MissingParameter(KT_STEP))?,
            v_freeze_init: self
                .v_freeze_init
                .ok_or(ConfigError::MissingParameter(V_FREEZE_INIT))?,
            v_freeze_step: self
                .v_freeze_step
                .ok_or(ConfigError::MissingParameter(V_FREEZE_STEP))?,
        };
        let physics = PhysicsConfig {
            global_v0: self
                .global_v0
                .ok_or(ConfigError::MissingParameter(GLOBAL_V0))?,
            debye_length: self
                .debye_length
                .ok_or(ConfigError::MissingParameter(DEBYE_LENGTH))?,
        };
        let config = AnnealConfig {
            schedule,
            physics,
            result_queue_size: self
                .result_queue_size
                .ok_or(ConfigError::MissingParameter(RESULT_QUEUE_SIZE))?,
            unfav_hop_scale: self
                .unfav_hop_scale
                .ok_or(ConfigError::MissingParameter(UNFAV_HOP_SCALE))?,
            seed: self.seed,
        };
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &AnnealConfig) -> Result<(), ConfigError> {
    let s = &config.schedule;
    check(KT_INIT, s.kt_init, s.kt_init > 0.0, "positive")?;
    check(
        KT_STEP,
        s.kt_step,
        s.kt_step > 0.0 && s.kt_step <= 1.0,
        "in (0, 1]",
    )?;
    check(
        V_FREEZE_STEP,
        s.v_freeze_step,
        s.v_freeze_step >= 0.0,
        "non-negative",
    )?;
    check(
        UNFAV_HOP_SCALE,
        config.unfav_hop_scale,
        config.unfav_hop_scale > 0.0,
        "positive",
    )?;
    check(
        DEBYE_LENGTH,
        config.physics.debye_length,
        config.physics.debye_length > 0.0,
        "positive",
    )?;
    check(
        GLOBAL_V0,
        config.physics.global_v0,
        config.physics.global_v0.is_finite(),
        "finite",
    )?;
    check(
        V_FREEZE_INIT,
        s.v_freeze_init,
        s.v_freeze_init.is_finite(),
        "finite",
    )
}

// NaN fails every comparison above, so it is rejected along with out-of-range values.
fn check(
    key: &'static str,
    value: f64,
    ok: bool,
    requirement: &'static str,
) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            requirement,
        })
    }
}
