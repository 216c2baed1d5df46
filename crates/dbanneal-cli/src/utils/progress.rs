use dbanneal::engine::progress::{CycleStatus, Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;
const SPINNER_TEMPLATE: &str = "{spinner:.green} {prefix:.bold} {msg}";
const CYCLE_TEMPLATE: &str =
    "{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} cycles ({eta}) {msg}";

/// Draws the anneal on stderr: a spinner while sites are precomputed, then a
/// cycle bar whose message shows the live schedule (phase, kT, v_freeze)
/// and energy. Milestones are printed above the bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target).with_style(spinner_style());
        Self { bar }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |event| render(&bar, event))
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn render(bar: &ProgressBar, event: Progress) {
    match event {
        Progress::PhaseStart { name } => {
            bar.reset();
            bar.unset_length();
            bar.set_style(spinner_style());
            bar.set_prefix(name);
            bar.set_message("");
            bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::TaskStart { total_steps } => {
            bar.disable_steady_tick();
            bar.reset();
            bar.set_length(total_steps);
            bar.set_style(cycle_style());
        }
        Progress::TaskIncrement => bar.inc(1),
        Progress::Cycle(status) => bar.set_message(cycle_message(&status)),
        Progress::StatusUpdate { text } => bar.println(format!("  {text}")),
        Progress::TaskFinish => {
            if let Some(length) = bar.length() {
                bar.set_position(length);
            }
        }
        Progress::PhaseFinish => {
            bar.disable_steady_tick();
            bar.finish_with_message("✓");
        }
    }
}

fn cycle_message(status: &CycleStatus) -> String {
    format!(
        "{:<10} kT={:.3e} eV  v_freeze={:.4} eV  E={:.6} eV",
        status.phase.to_string(),
        status.kt,
        status.v_freeze,
        status.energy
    )
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE).expect("spinner template is valid")
}

fn cycle_style() -> ProgressStyle {
    ProgressStyle::with_template(CYCLE_TEMPLATE)
        .expect("cycle bar template is valid")
        .progress_chars("##-")
}
