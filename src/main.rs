use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;
use tracing::{warn, Level};

use wground::app::run_app;
use wground::cli::Args;
use wground::config::{Config, SavedStation};
use wground::pws;
use wground::report::print_current;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn watch(config: &Config, saved: &SavedStation) -> io::Result<()> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, config, pws::current_observation, saved);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let saved = SavedStation::from_project_dirs();
    let config = match Config::resolve(&args, &saved) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if args.watch {
        if let Err(err) = watch(&config, &saved) {
            println!("{:?}", err);
        }
    } else {
        match print_current(&config, &mut io::stdout().lock()) {
            Ok(Some(_)) => saved.remember(&config.station_id),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "could not write report"),
        }
    }

    ExitCode::SUCCESS
}
