//! UI state for the installer TUI.

use setupvisor_core::{ProgressState, SupervisorConfig};

use crate::actions::{build_plan, steps_from_plan};
use crate::events::WorkerEvent;
use crate::model::{ActionStep, SimulationOptions, StepStatus};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunState {
    // No configuration has run yet.
    Idle,
    // Configuration is running.
    Running,
    // Configuration finished successfully.
    Completed,
    // Configuration failed.
    Failed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen {
    // Landing screen with simulation options.
    Welcome,
    // Server configuring page.
    Configuring,
}

/// Presentation state the supervisor's effects write into.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfiguringPage {
    pub enabled: bool,
    pub progress: ProgressState,
    pub progress_text: String,
    pub wait_info_visible: bool,
    pub wait_info_text: String,
    pub busy_visible: bool,
    pub busy_text: String,
    pub back_visible: bool,
    /// Blocking error notice; dismissed with Enter.
    pub error_notice: Option<String>,
}

impl ConfiguringPage {
    pub fn new(maximum: u32, wait_text: String) -> Self {
        Self {
            enabled: true,
            progress: ProgressState {
                value: 0,
                maximum,
                visible: true,
            },
            progress_text: "Configuring...".to_string(),
            wait_info_visible: true,
            wait_info_text: wait_text,
            busy_visible: false,
            busy_text: String::new(),
            back_visible: true,
            error_notice: None,
        }
    }

    pub fn on_update_page(&mut self) {
        self.progress.value = 0;
        self.error_notice = None;
    }
}

pub struct App {
    pub screen: Screen,
    pub options: SimulationOptions,
    pub page: ConfiguringPage,
    pub run_state: RunState,

    // Steps for the active configuration.
    pub steps: Vec<ActionStep>,

    // Log lines for UI display.
    pub logs: Vec<String>,

    // Last error message for failure display.
    pub last_error: Option<String>,
}

impl App {
    pub fn new(config: &SupervisorConfig, wait_text: String, options: SimulationOptions) -> Self {
        Self {
            screen: Screen::Welcome,
            options,
            page: ConfiguringPage::new(config.progress_maximum, wait_text),
            run_state: RunState::Idle,
            steps: Vec::new(),
            logs: Vec::new(),
            last_error: None,
        }
    }

    /// Switches to the configuring page with a fresh plan.
    pub fn begin_configuration(&mut self) {
        self.steps = steps_from_plan(&build_plan());
        self.logs.clear();
        self.last_error = None;
        self.run_state = RunState::Running;
        self.page.on_update_page();
        self.screen = Screen::Configuring;
    }

    pub fn finish_configuration(&mut self, error: Option<String>) {
        self.run_state = if error.is_some() {
            RunState::Failed
        } else {
            RunState::Completed
        };
        if let Some(err) = &error {
            append_log(self, format!("Error: {err}"));
        }
        self.last_error = error;
    }

    pub fn reset_to_menu(&mut self) {
        self.screen = Screen::Welcome;
        self.run_state = RunState::Idle;
        self.last_error = None;
        self.logs.clear();
        self.steps.clear();
        self.page.error_notice = None;
    }

    pub fn apply_worker_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::StepStarted(index) => {
                if let Some(step) = self.steps.get_mut(index) {
                    step.status = StepStatus::Running;
                    let line = format!("{}...", step.name);
                    append_log(self, line);
                }
            }
            WorkerEvent::StepCompleted(index) => {
                if let Some(step) = self.steps.get_mut(index) {
                    step.status = StepStatus::Done;
                }
            }
            WorkerEvent::StepFailed(index, err) => {
                if let Some(step) = self.steps.get_mut(index) {
                    step.status = StepStatus::Failed;
                }
                append_log(self, format!("Step failed: {err}"));
            }
            WorkerEvent::LogLine(line) => append_log(self, line),
        }
    }
}

fn append_log(app: &mut App, line: String) {
    // Bound log memory usage by trimming old entries.
    const MAX_LINES: usize = 200;

    app.logs.push(line);

    if app.logs.len() > MAX_LINES {
        let excess = app.logs.len() - MAX_LINES;
        app.logs.drain(0..excess);
    }
}
