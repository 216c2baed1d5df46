use super::schedule::AnnealPhase;

/// Schedule and energy after one completed cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleStatus {
    /// Phase the cycle ran in.
    pub phase: AnnealPhase,
    /// kT used by the cycle's population pass, in eV.
    pub kt: f64,
    /// Freeze-out potential used by the cycle's population pass, in eV.
    pub v_freeze: f64,
    /// Energy of the configuration the cycle ended with, in eV.
    pub energy: f64,
}

/// Events emitted by a running workflow.
///
/// A phase brackets one stage of the run (`"Precompute"`, `"Annealing"`).
/// Inside a phase, a task counts steps; the annealing task counts one step
/// per completed cycle and follows each with a [`Progress::Cycle`] status.
/// `StatusUpdate` marks milestones: the end of the pre-anneal and the final
/// energy.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Cycle(CycleStatus),
    StatusUpdate { text: String },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback; without one, events are dropped.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// Returns `true` if events are delivered anywhere.
    pub fn is_active(&self) -> bool {
        self.callback.is_some()
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_inactive() {
        let reporter = ProgressReporter::new();
        assert!(!reporter.is_active());
        reporter.report(Progress::TaskIncrement);
    }

    #[test]
    fn callback_receives_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let label = match event {
                Progress::PhaseStart { name } => name.to_string(),
                Progress::TaskIncrement => "+".to_string(),
                _ => "other".to_string(),
            };
            seen.lock().unwrap().push(label);
        }));
        assert!(reporter.is_active());

        reporter.report(Progress::PhaseStart { name: "Annealing" });
        reporter.report(Progress::TaskIncrement);
        reporter.report(Progress::PhaseFinish);
        drop(reporter);

        assert_eq!(seen.into_inner().unwrap(), vec!["Annealing", "+", "other"]);
    }
}
