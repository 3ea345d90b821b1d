use std::io::{stdout, Stdout};
use std::process::ExitCode;

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use log::{debug, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use shelf_core::config::{self, Config};
use shelf_core::error::Result;
use shelf_core::execution;
use shelf_core::tree::CommandTree;
use shelf_tui::app::{self, Action, App};
use shelf_tui::cli_args::Args;
use shelf_tui::editor;

fn run() -> Result<()> {
    let args = Args::parse();
    let config_path = config::get_config_path(&args.config_path);

    if args.print_config_path {
        println!("{config_path}");
        return Ok(());
    }

    debug!("Config path: `{config_path}`");
    let config = match Config::load(&args.config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Could not load config ({e}), using fallback configuration");
            Config::fallback()
        }
    };

    let mut app = App::new(CommandTree::from_config(&config));

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, &config_path);
    teardown_terminal(&mut terminal)?;
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    config_path: &str,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app::draw(frame, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match app.handle_key(key) {
                    Some(Action::Quit) => return Ok(()),
                    Some(Action::Run(command)) => {
                        run_suspended(terminal, || execution::run_interactive(&command))?;
                    }
                    Some(Action::EditConfig) => match editor::resolve() {
                        Ok(editor) => {
                            run_suspended(terminal, || editor::launch(&editor, config_path))?;
                        }
                        Err(e) => warn!("{e}"),
                    },
                    None => {}
                }
            }
            // Resize is picked up by the next draw; other events are ignored
            _ => {}
        }
    }
}

/// Hands the terminal to a foreground child for the duration of `f`, then
/// restores the TUI. The event loop blocks here; completion of the child is
/// the only thing that resumes it.
fn run_suspended<F>(terminal: &mut Terminal<CrosstermBackend<Stdout>>, f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;

    let result = f();

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen, cursor::Hide)?;
    terminal.clear()?;

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
