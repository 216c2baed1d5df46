use super::config::ScheduleConfig;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnealPhase {
    /// Schedule parameters are frozen while the pre-anneal counter runs down.
    PreAnneal,
    /// kT decays and v_freeze rises every cycle.
    Annealing,
    Done,
}

impl fmt::Display for AnnealPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnnealPhase::PreAnneal => "pre-anneal",
            AnnealPhase::Annealing => "annealing",
            AnnealPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Cycle counters and the two control parameters of the anneal.
///
/// A run is `preanneal_cycles` PreAnneal cycles followed by `anneal_cycles`
/// Annealing cycles. With `anneal_cycles == 0` the schedule starts in
/// [`AnnealPhase::Done`] and no cycle runs at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    cycle: usize,
    max_cycles: usize,
    preanneal_remaining: usize,
    kt: f64,
    kt_step: f64,
    v_freeze: f64,
    v_freeze_step: f64,
}

impl Schedule {
    pub fn new(config: &ScheduleConfig) -> Self {
        Self {
            cycle: 0,
            max_cycles: config.anneal_cycles,
            preanneal_remaining: config.preanneal_cycles,
            kt: config.kt_init,
            kt_step: config.kt_step,
            v_freeze: config.v_freeze_init,
            v_freeze_step: config.v_freeze_step,
        }
    }

    pub fn phase(&self) -> AnnealPhase {
        if self.cycle >= self.max_cycles {
            AnnealPhase::Done
        } else if self.preanneal_remaining > 0 {
            AnnealPhase::PreAnneal
        } else {
            AnnealPhase::Annealing
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase() == AnnealPhase::Done
    }

    /// Index of the current Annealing cycle; stays at 0 during PreAnneal.
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    pub fn preanneal_remaining(&self) -> usize {
        self.preanneal_remaining
    }

    pub fn kt(&self) -> f64 {
        self.kt
    }

    pub fn v_freeze(&self) -> f64 {
        self.v_freeze
    }

    /// Total number of cycles a fresh schedule of this shape runs, clamped
    /// to `usize::MAX`.
    pub fn total_cycles(config: &ScheduleConfig) -> usize {
        if config.anneal_cycles == 0 {
            0
        } else {
            config.preanneal_cycles.saturating_add(config.anneal_cycles)
        }
    }

    /// Ends the current cycle and returns the phase of the next one.
    ///
    /// PreAnneal only counts down. Annealing multiplies kT by its decay
    /// factor, adds the increment to v_freeze and counts up. Done is terminal.
    pub fn advance(&mut self) -> AnnealPhase {
        match self.phase() {
            AnnealPhase::PreAnneal => self.preanneal_remaining -= 1,
            AnnealPhase::Annealing => {
                self.cycle += 1;
                self.kt *= self.kt_step;
                self.v_freeze += self.v_freeze_step;
            }
            AnnealPhase::Done => {}
        }
        self.phase()
    }
}
