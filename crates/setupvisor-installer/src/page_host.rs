//! Binds the supervisor's effects to the configuring page.
//!
//! The host owns the [`App`] behind a `RefCell`; every effect mutates it and
//! redraws synchronously, so the page on screen always matches the state the
//! supervisor last wrote.

use std::cell::RefCell;

use setupvisor_core::{
    ActionSupervisor, BusySignal, Effects, PageEffects, ProgressEffects, WidgetEffects,
};

use crate::actions::{build_plan, configure_server, ConfigureError};
use crate::app::App;

pub struct PageHost<'r> {
    app: RefCell<App>,
    redraw: Box<dyn Fn(&App) + 'r>,
}

impl<'r> PageHost<'r> {
    pub fn new(app: App, redraw: impl Fn(&App) + 'r) -> Self {
        Self {
            app: RefCell::new(app),
            redraw: Box::new(redraw),
        }
    }

    /// Mutates the app state, then redraws.
    pub fn update(&self, f: impl FnOnce(&mut App)) {
        f(&mut *self.app.borrow_mut());
        self.redraw();
    }

    pub fn read<T>(&self, f: impl FnOnce(&App) -> T) -> T {
        f(&*self.app.borrow())
    }

    pub fn redraw(&self) {
        (self.redraw)(&*self.app.borrow());
    }

    pub fn effects(&self) -> Effects<'_> {
        Effects {
            page: PageEffects::default()
                .with_enabled(|enabled| self.update(|app| app.page.enabled = enabled)),
            progress: ProgressEffects::default()
                .with_visible(|visible| self.update(|app| app.page.progress.visible = visible))
                .with_set_value(|value| self.update(|app| app.page.progress.value = value))
                .with_value(|| self.read(|app| app.page.progress.value))
                .with_maximum(|| self.read(|app| app.page.progress.maximum)),
            button: WidgetEffects::default()
                .with_visible(|visible| self.update(|app| app.page.back_visible = visible)),
            wait_info: WidgetEffects::default()
                .with_visible(|visible| self.update(|app| app.page.wait_info_visible = visible))
                .with_text(|text| self.update(|app| app.page.wait_info_text = text.to_string())),
            busy_info: WidgetEffects::default()
                .with_visible(|visible| self.update(|app| app.page.busy_visible = visible))
                .with_text(|text| self.update(|app| app.page.busy_text = text.to_string())),
            error_notice: None,
        }
        .with_error_notice(|message| {
            self.update(|app| app.page.error_notice = Some(message.to_string()))
        })
    }

    #[cfg(test)]
    pub fn into_app(self) -> App {
        self.app.into_inner()
    }
}

/// Runs the simulated server configuration under the supervisor.
pub async fn run_configuration(
    host: &PageHost<'_>,
    supervisor: &mut ActionSupervisor,
    busy: &BusySignal,
) -> Result<(), ConfigureError> {
    host.update(App::begin_configuration);
    let options = host.read(|app| app.options.clone());
    let plan = build_plan();
    let effects = host.effects();

    let result = supervisor
        .run(
            || {
                configure_server(&plan, &options, busy, |event| {
                    host.update(|app| app.apply_worker_event(event))
                })
            },
            &effects,
            Some(busy),
        )
        .await;

    let error = result.as_ref().err().map(ToString::to_string);
    host.update(|app| app.finish_configuration(error));
    result
}
