//! Presentation callbacks driven by the supervisor.
//!
//! Every handle is optional; an absent handle is a no-op. All handles are
//! called synchronously from the task that awaits `ActionSupervisor::run`,
//! zero or more times, never concurrently with each other.

pub type ToggleFn<'a> = Box<dyn Fn(bool) + 'a>;
pub type TextFn<'a> = Box<dyn Fn(&str) + 'a>;
pub type SetValueFn<'a> = Box<dyn Fn(u32) + 'a>;
pub type GetValueFn<'a> = Box<dyn Fn() -> u32 + 'a>;

/// Input surface of the calling page.
#[derive(Default)]
pub struct PageEffects<'a> {
    pub set_enabled: Option<ToggleFn<'a>>,
}

impl<'a> PageEffects<'a> {
    pub fn with_enabled(mut self, f: impl Fn(bool) + 'a) -> Self {
        self.set_enabled = Some(Box::new(f));
        self
    }

    pub(crate) fn enabled(&self, enabled: bool) {
        if let Some(f) = &self.set_enabled {
            f(enabled);
        }
    }
}

/// Progress indicator handles.
///
/// When `value` is absent the supervisor reads back the last value it set;
/// when `maximum` is absent it uses the configured default.
#[derive(Default)]
pub struct ProgressEffects<'a> {
    pub set_visible: Option<ToggleFn<'a>>,
    pub set_value: Option<SetValueFn<'a>>,
    pub value: Option<GetValueFn<'a>>,
    pub maximum: Option<GetValueFn<'a>>,
}

impl<'a> ProgressEffects<'a> {
    pub fn with_visible(mut self, f: impl Fn(bool) + 'a) -> Self {
        self.set_visible = Some(Box::new(f));
        self
    }

    pub fn with_set_value(mut self, f: impl Fn(u32) + 'a) -> Self {
        self.set_value = Some(Box::new(f));
        self
    }

    pub fn with_value(mut self, f: impl Fn() -> u32 + 'a) -> Self {
        self.value = Some(Box::new(f));
        self
    }

    pub fn with_maximum(mut self, f: impl Fn() -> u32 + 'a) -> Self {
        self.maximum = Some(Box::new(f));
        self
    }

    pub(crate) fn visible(&self, visible: bool) {
        if let Some(f) = &self.set_visible {
            f(visible);
        }
    }
}

/// A control with visibility and text: the secondary button, the wait
/// banner, or the busy banner.
#[derive(Default)]
pub struct WidgetEffects<'a> {
    pub set_visible: Option<ToggleFn<'a>>,
    pub set_text: Option<TextFn<'a>>,
}

impl<'a> WidgetEffects<'a> {
    pub fn with_visible(mut self, f: impl Fn(bool) + 'a) -> Self {
        self.set_visible = Some(Box::new(f));
        self
    }

    pub fn with_text(mut self, f: impl Fn(&str) + 'a) -> Self {
        self.set_text = Some(Box::new(f));
        self
    }

    pub fn has_text(&self) -> bool {
        self.set_text.is_some()
    }

    pub(crate) fn visible(&self, visible: bool) {
        if let Some(f) = &self.set_visible {
            f(visible);
        }
    }

    pub(crate) fn text(&self, text: &str) {
        if let Some(f) = &self.set_text {
            f(text);
        }
    }
}

/// The full set of presentation callbacks for one supervised action.
#[derive(Default)]
pub struct Effects<'a> {
    pub page: PageEffects<'a>,
    pub progress: ProgressEffects<'a>,
    /// Secondary control hidden while the action runs.
    pub button: WidgetEffects<'a>,
    /// "Please wait" banner.
    pub wait_info: WidgetEffects<'a>,
    /// Busy banner; without a text handle the busy signal is never observed.
    pub busy_info: WidgetEffects<'a>,
    /// Blocking notice shown when the action fails.
    pub error_notice: Option<TextFn<'a>>,
}

impl<'a> Effects<'a> {
    pub fn with_error_notice(mut self, f: impl Fn(&str) + 'a) -> Self {
        self.error_notice = Some(Box::new(f));
        self
    }

    pub(crate) fn notify_error(&self, message: &str) {
        if let Some(f) = &self.error_notice {
            f(message);
        }
    }
}

impl std::fmt::Debug for Effects<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effects")
            .field("page", &self.page.set_enabled.is_some())
            .field("progress_value", &self.progress.value.is_some())
            .field("progress_maximum", &self.progress.maximum.is_some())
            .field("button", &self.button.set_visible.is_some())
            .field("wait_info", &self.wait_info.has_text())
            .field("busy_info", &self.busy_info.has_text())
            .field("error_notice", &self.error_notice.is_some())
            .finish()
    }
}
