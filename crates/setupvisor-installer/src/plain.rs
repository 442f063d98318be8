//! Headless mode: supervised configuration with progress printed as lines.

use std::cell::Cell;

use setupvisor_core::{
    ActionSupervisor, BusySignal, Effects, PageEffects, ProgressEffects, WidgetEffects,
};

use crate::actions::{build_plan, configure_server, ConfigureError};
use crate::events::WorkerEvent;
use crate::model::SimulationOptions;

const BAR_WIDTH: usize = 20;

/// Tracks the printed progress so each tenth is reported once.
struct LineReporter {
    value: Cell<u32>,
    maximum: u32,
    last_tenth: Cell<Option<u32>>,
}

impl LineReporter {
    fn new(maximum: u32) -> Self {
        Self {
            value: Cell::new(0),
            maximum,
            last_tenth: Cell::new(None),
        }
    }

    fn set_value(&self, value: u32) {
        self.value.set(value);
        let tenth = tenth_of(value, self.maximum);
        if self.last_tenth.get() == Some(tenth) {
            return;
        }
        self.last_tenth.set(Some(tenth));
        println!("{}", format_progress_line(value, self.maximum));
    }

    fn effects(&self) -> Effects<'_> {
        Effects {
            page: PageEffects::default(),
            progress: ProgressEffects::default()
                .with_set_value(|value| self.set_value(value))
                .with_value(|| self.value.get())
                .with_maximum(|| self.maximum),
            button: WidgetEffects::default(),
            wait_info: WidgetEffects::default().with_text(|text| println!("{text}")),
            busy_info: WidgetEffects::default().with_text(|text| {
                if text.is_empty() {
                    println!("Server is free again, resuming");
                } else {
                    println!("{text}");
                }
            }),
            error_notice: None,
        }
        .with_error_notice(|message| eprintln!("{message}"))
    }
}

fn tenth_of(value: u32, maximum: u32) -> u32 {
    let value = value.min(maximum);
    (u64::from(value) * 10 / u64::from(maximum.max(1))) as u32
}

/// Renders `[#####---------------]  25%`, saturating at a full bar.
pub fn format_progress_line(value: u32, maximum: u32) -> String {
    let maximum = maximum.max(1);
    let shown = value.min(maximum);
    let percent = u64::from(shown) * 100 / u64::from(maximum);
    let filled = (u64::from(shown) * BAR_WIDTH as u64 / u64::from(maximum)) as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}

pub async fn run(
    supervisor: &mut ActionSupervisor,
    options: &SimulationOptions,
    busy: &BusySignal,
) -> Result<(), ConfigureError> {
    let plan = build_plan();
    let reporter = LineReporter::new(supervisor.config().progress_maximum);
    let effects = reporter.effects();

    supervisor
        .run(
            || {
                configure_server(&plan, options, busy, |event| match event {
                    WorkerEvent::StepStarted(index) => {
                        if let Some(step) = plan.get(index) {
                            println!("- {}", step.label());
                        }
                    }
                    WorkerEvent::StepFailed(_, err) => println!("  failed: {err}"),
                    WorkerEvent::LogLine(line) => println!("  {line}"),
                    WorkerEvent::StepCompleted(_) => {}
                })
            },
            &effects,
            Some(busy),
        )
        .await
}
