use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use makendx::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

struct BarState {
    pb: ProgressBar,
    phase: &'static str,
}

/// Renders engine [`Progress`] events as a single spinner/bar on stderr.
///
/// Each phase starts as a spinner, switches to a bar when a counted task begins, and is
/// left on screen as `✓ <phase>` when it finishes. Nothing is drawn between phases, so
/// prompts on stdout are never overdrawn.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), target).with_style(Self::spinner_style());
        pb.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(BarState { pb, phase: "" })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut guard) = state.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };
            let BarState { pb, phase } = &mut *guard;

            match progress {
                Progress::PhaseStart { name } => {
                    *phase = name;
                    pb.reset();
                    pb.set_length(0);
                    pb.set_style(Self::spinner_style());
                    pb.set_message(name);
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                }
                Progress::PhaseFinish => {
                    pb.disable_steady_tick();
                    pb.set_style(Self::spinner_style());
                    pb.finish_with_message(format!("✓ {}", phase));
                }
                Progress::TaskStart { total_steps } => {
                    pb.disable_steady_tick();
                    pb.set_style(Self::bar_style());
                    pb.set_length(total_steps);
                    pb.set_position(0);
                }
                Progress::TaskIncrement => pb.inc(1),
                Progress::TaskFinish => {
                    let total = pb.length().unwrap_or(0);
                    pb.set_position(total);
                }
                Progress::Message(msg) => pb.println(format!("  {}", msg)),
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn handler_initializes_in_a_finished_state() {
        let handler = hidden_handler();
        let state = handler.state.lock().unwrap();
        assert!(state.pb.is_finished());
        assert_eq!(state.phase, "");
    }

    #[test]
    fn callback_walks_through_a_phase_with_a_task() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Building groups",
        });
        {
            let state = handler.state.lock().unwrap();
            assert_eq!(state.pb.message(), "Building groups");
            assert!(!state.pb.is_finished());
        }

        callback(Progress::TaskStart { total_steps: 3 });
        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);
        {
            let state = handler.state.lock().unwrap();
            assert_eq!(state.pb.length(), Some(3));
            assert_eq!(state.pb.position(), 2);
        }

        callback(Progress::TaskFinish);
        assert_eq!(handler.state.lock().unwrap().pb.position(), 3);

        callback(Progress::PhaseFinish);
        let state = handler.state.lock().unwrap();
        assert!(state.pb.is_finished());
        assert_eq!(state.pb.message(), "✓ Building groups");
    }

    #[test]
    fn callback_is_usable_from_another_thread() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Writing index",
            });
            callback(Progress::Message("2 groups".to_string()));
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let state = handler.state.lock().unwrap();
        assert!(state.pb.is_finished());
        assert_eq!(state.pb.message(), "✓ Writing index");
    }
}
