//! setupvisor installer entrypoint: configures a simulated server under the
//! action supervisor, with a ratatui page or plain progress lines.

mod actions;
mod app;
mod events;
mod model;
mod page_host;
mod plain;
#[path = "runtime_config.rs"]
mod runtime_config;
mod terminal;
mod ui;

use std::cell::RefCell;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tracing::info;

use setupvisor_core::{ActionSupervisor, BusySignal};

use crate::actions::StepKind;
use crate::app::{App, RunState, Screen};
use crate::model::SimulationOptions;
use crate::page_host::{run_configuration, PageHost};
use crate::runtime_config::{init_tracing, load_config};
use crate::terminal::TerminalGuard;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print progress lines instead of the terminal UI
    #[arg(long)]
    plain: bool,

    /// Make this step of the simulated server fail
    #[arg(long, value_enum)]
    fail_at: Option<StepKind>,

    /// Report the simulated server busy while this step runs
    #[arg(long, value_enum)]
    busy_at: Option<StepKind>,

    /// Seconds the simulated server stays busy
    #[arg(long, default_value_t = SimulationOptions::DEFAULT_BUSY_SECS)]
    busy_secs: u64,

    /// Validate configuration and exit
    #[arg(long)]
    check: bool,
}

impl Args {
    fn simulation_options(&self) -> SimulationOptions {
        SimulationOptions {
            fail_at: self.fail_at,
            busy_at: self.busy_at,
            busy_for: Duration::from_secs(self.busy_secs),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args).context("load config")?;

    if args.check || args.plain {
        init_tracing(&config);
    }
    if args.check {
        info!("configuration loaded successfully");
        return Ok(());
    }

    let mut supervisor = ActionSupervisor::new(config.supervisor.clone());
    let busy = BusySignal::new();
    let options = args.simulation_options();

    if args.plain {
        return plain::run(&mut supervisor, &options, &busy)
            .await
            .map_err(|err| anyhow!("server configuration failed: {err}"));
    }

    let app = App::new(&config.supervisor, supervisor.wait_message(), options);
    let mut terminal_guard = TerminalGuard::new()?;
    let result = run_app(&mut terminal_guard, app, &mut supervisor, &busy).await;
    terminal_guard.restore()?;
    result
}

enum Command {
    Configure,
    Quit,
}

async fn run_app(
    terminal_guard: &mut TerminalGuard,
    app: App,
    supervisor: &mut ActionSupervisor,
    busy: &BusySignal,
) -> Result<()> {
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<Event>();
    spawn_input_thread(input_tx);

    let terminal = RefCell::new(terminal_guard);
    let host = PageHost::new(app, |app| {
        // Effects cannot propagate draw errors; the main loop below does.
        let _ = terminal.borrow_mut().draw(app);
    });
    host.redraw();

    while let Some(event) = input_rx.recv().await {
        let screen = host.read(|app| app.screen);
        let command = match (event, screen) {
            (Event::Key(key), Screen::Welcome) => {
                let mut command = None;
                host.update(|app| command = handle_welcome_key(app, key));
                command
            }
            (Event::Key(key), Screen::Configuring) => {
                let mut command = None;
                host.update(|app| command = handle_configuring_key(app, key));
                command
            }
            _ => None,
        };

        match command {
            Some(Command::Quit) => break,
            Some(Command::Configure) => {
                // The outcome is shown on the page; nothing to propagate.
                let _ = run_configuration(&host, supervisor, busy).await;
                // Keys pressed while the page was disabled are dropped.
                while input_rx.try_recv().is_ok() {}
            }
            None => {}
        }

        host.read(|app| terminal.borrow_mut().draw(app))?;
    }
    Ok(())
}

fn handle_welcome_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.options.toggle_failure();
            None
        }
        KeyCode::Char('b') | KeyCode::Char('B') => {
            app.options.toggle_busy();
            None
        }
        KeyCode::Enter => Some(Command::Configure),
        _ => None,
    }
}

fn handle_configuring_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press || !app.page.enabled {
        return None;
    }
    if app.page.error_notice.is_some() {
        // The notice blocks the page until dismissed.
        if key.code == KeyCode::Enter {
            app.page.error_notice = None;
        }
        return None;
    }
    if matches!(app.run_state, RunState::Running) {
        return None;
    }
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.reset_to_menu();
            None
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}

fn spawn_input_thread(input_tx: mpsc::UnboundedSender<Event>) {
    // Forward blocking terminal events to the UI task; exit on channel close.
    thread::spawn(move || {
        while let Ok(event) = event::read() {
            if input_tx.send(event).is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use setupvisor_core::SupervisorConfig;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(
            &SupervisorConfig::default(),
            "wait".to_string(),
            SimulationOptions::default(),
        )
    }

    #[test]
    fn welcome_keys_toggle_options_and_start() {
        let mut app = app();
        assert!(handle_welcome_key(&mut app, press(KeyCode::Char('f'))).is_none());
        assert_eq!(app.options.fail_at, Some(SimulationOptions::DEFAULT_FAIL_STEP));
        assert!(handle_welcome_key(&mut app, press(KeyCode::Char('B'))).is_none());
        assert_eq!(app.options.busy_at, Some(SimulationOptions::DEFAULT_BUSY_STEP));
        assert!(matches!(
            handle_welcome_key(&mut app, press(KeyCode::Enter)),
            Some(Command::Configure)
        ));
        assert!(matches!(
            handle_welcome_key(&mut app, press(KeyCode::Char('q'))),
            Some(Command::Quit)
        ));
    }

    #[test]
    fn disabled_page_ignores_input() {
        let mut app = app();
        app.begin_configuration();
        app.page.enabled = false;
        assert!(handle_configuring_key(&mut app, press(KeyCode::Char('q'))).is_none());
        assert_eq!(app.screen, Screen::Configuring);
    }

    #[test]
    fn error_notice_must_be_dismissed_first() {
        let mut app = app();
        app.begin_configuration();
        app.finish_configuration(Some("boom".to_string()));
        app.page.error_notice = Some("boom".to_string());

        assert!(handle_configuring_key(&mut app, press(KeyCode::Char('q'))).is_none());
        assert!(handle_configuring_key(&mut app, press(KeyCode::Enter)).is_none());
        assert!(app.page.error_notice.is_none());
        assert_eq!(app.screen, Screen::Configuring);

        assert!(handle_configuring_key(&mut app, press(KeyCode::Enter)).is_none());
        assert_eq!(app.screen, Screen::Welcome);
    }

    #[test]
    fn cli_options_map_to_simulation() {
        let args = Args::parse_from([
            "setupvisor-installer",
            "--fail-at",
            "configure-firewall",
            "--busy-at",
            "wait-package-manager",
            "--busy-secs",
            "3",
        ]);
        let options = args.simulation_options();
        assert_eq!(options.fail_at, Some(StepKind::ConfigureFirewall));
        assert_eq!(options.busy_at, Some(StepKind::WaitPackageManager));
        assert_eq!(options.busy_for, Duration::from_secs(3));
    }
}
