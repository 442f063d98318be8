//! Per-call supervision state: the progress tick, the busy subscription,
//! and the UI bookkeeping around one action.
//!
//! A session owns its timer and subscription, so both are released when it
//! is dropped, including when the action panics or the `run` future is
//! dropped before completion.

use std::fmt::Display;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::SupervisorConfig;

use super::{
    BusySignal, BusySubscription, Effects, BUSY_MESSAGE, ERROR_PREFIX, FINISHED_MESSAGE,
};

pub(super) enum SessionEvent {
    Tick,
    Busy(Option<bool>),
}

pub(super) struct SupervisionSession<'s, 'a> {
    config: &'s SupervisorConfig,
    effects: &'s Effects<'a>,
    // Absent while paused by a busy transition and after the action finishes.
    ticker: Option<Interval>,
    busy: Option<BusySubscription>,
    paused: bool,
    maximum: u32,
    // Read-back value for callers that do not expose a progress getter.
    last_value: u32,
    finished: bool,
}

impl<'s, 'a> SupervisionSession<'s, 'a> {
    /// Puts the page into its running state and starts ticking.
    pub(super) fn start(
        config: &'s SupervisorConfig,
        effects: &'s Effects<'a>,
        busy: Option<&BusySignal>,
        wait_message: &str,
    ) -> Self {
        effects.progress.visible(true);
        effects.page.enabled(false);
        effects.button.visible(false);
        effects.wait_info.visible(true);
        effects.wait_info.text(wait_message);

        let mut session = Self {
            config,
            effects,
            ticker: None,
            busy: None,
            paused: false,
            maximum: 1,
            last_value: 0,
            finished: false,
        };
        session.maximum = session.read_maximum();
        session.set_value(0);
        session.resume_ticking();

        // Only observe the busy signal when there is somewhere to show it.
        if effects.busy_info.has_text() {
            session.busy = busy.map(BusySignal::subscribe);
        }
        session
    }

    pub(super) fn maximum(&self) -> u32 {
        self.maximum
    }

    pub(super) fn value(&self) -> u32 {
        match &self.effects.progress.value {
            Some(get) => get(),
            None => self.last_value,
        }
    }

    fn set_value(&mut self, value: u32) {
        self.last_value = value;
        if let Some(set) = &self.effects.progress.set_value {
            set(value);
        }
    }

    fn read_maximum(&self) -> u32 {
        let maximum = match &self.effects.progress.maximum {
            Some(get) => get(),
            None => self.config.progress_maximum,
        };
        if maximum == 0 {
            warn!("progress maximum is zero; using 1");
            return 1;
        }
        maximum
    }

    /// Waits for the next tick or busy transition. Cancel safe.
    pub(super) async fn next_event(&mut self) -> SessionEvent {
        tokio::select! {
            biased;
            busy = busy_changed(&mut self.busy) => SessionEvent::Busy(busy),
            () = next_tick(&mut self.ticker) => SessionEvent::Tick,
        }
    }

    pub(super) fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Tick => {
                // No clamp here: the bar may overshoot while the action is outstanding.
                let next = self.value().saturating_add(1);
                self.set_value(next);
            }
            SessionEvent::Busy(Some(busy)) => self.on_busy(busy),
            SessionEvent::Busy(None) => {
                debug!("busy signal closed; resuming progress");
                self.busy = None;
                self.on_busy(false);
            }
        }
    }

    fn on_busy(&mut self, busy: bool) {
        if busy == self.paused {
            return;
        }
        debug!(busy, value = self.value(), "busy state changed");
        self.paused = busy;
        if busy {
            self.ticker = None;
        } else {
            self.resume_ticking();
        }
        let banner = &self.effects.busy_info;
        banner.visible(busy);
        banner.text(if busy { BUSY_MESSAGE } else { "" });
    }

    fn resume_ticking(&mut self) {
        let period = self.config.tick_interval();
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ticker = Some(ticker);
    }

    /// Drops the busy subscription. Safe to call when never subscribed.
    pub(super) fn release_busy(&mut self) {
        self.busy = None;
    }

    pub(super) fn stop_ticking(&mut self) {
        self.ticker = None;
    }

    /// Pulls an overshooting value back to the maximum once ticking has stopped.
    fn settle(&mut self) {
        if self.value() > self.maximum {
            let maximum = self.maximum;
            self.set_value(maximum);
        }
    }

    /// Rolls the page back to its interactive state and reports the error.
    pub(super) fn fail<E: Display>(&mut self, err: &E) {
        self.stop_ticking();
        self.release_busy();
        self.settle();
        let effects = self.effects;
        effects.page.enabled(true);
        effects.button.visible(true);
        effects.wait_info.visible(false);
        effects.progress.visible(false);
        effects.notify_error(&format!("{ERROR_PREFIX}\n{err}"));
        self.finished = true;
    }

    /// Sweeps the value up to the maximum, then restores the page.
    pub(super) async fn succeed(&mut self) {
        self.stop_ticking();
        self.release_busy();
        self.catch_up().await;
        self.settle();
        let effects = self.effects;
        effects.progress.visible(false);
        effects.button.visible(true);
        effects.page.enabled(true);
        effects.wait_info.text(FINISHED_MESSAGE);
        self.finished = true;
    }

    async fn catch_up(&mut self) {
        let maximum = self.maximum;
        let remaining = maximum.saturating_sub(self.value());
        if remaining == 0 {
            return;
        }
        debug!(remaining, "playing catch-up animation");
        let period = self.config.catch_up_interval();
        // Bounded by the distance measured before the sweep starts.
        for _ in 0..remaining {
            time::sleep(period).await;
            let next = self.value().saturating_add(1);
            self.set_value(next);
            if next >= maximum {
                break;
            }
        }
    }
}

impl Drop for SupervisionSession<'_, '_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("supervised action ended without a result; timer and busy subscription released");
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn busy_changed(busy: &mut Option<BusySubscription>) -> Option<bool> {
    match busy {
        Some(sub) => sub.changed().await,
        None => std::future::pending().await,
    }
}
