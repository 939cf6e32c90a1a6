//! bionic - read source files with bionic reading emphasis

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bionic_reading::display::print_document;
use bionic_reading::input::KEY_BINDINGS;
use bionic_reading::terminal::Terminal;
use bionic_reading::viewer::Viewer;
use bionic_reading::workspace::{Settings, Workspace};
use bionic_reading::{BionicError, EmphasisAdapter, EmphasisEngine, Result, Style};

/// Environment variable holding the log filter; logging is off when unset
const LOG_ENV: &str = "BIONIC_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut print = false;
    let mut files = Vec::new();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("bionic {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--print" | "-p" => print = true,
            _ if arg.starts_with('-') => {
                return Err(BionicError::Message(format!("Unknown option: {}", arg)));
            }
            _ => files.push(PathBuf::from(arg)),
        }
    }

    if files.is_empty() {
        print_usage();
        return Err(BionicError::Message("No files given".to_string()));
    }

    init_logging()?;

    let mut workspace = Workspace::new(Settings::load());
    for path in &files {
        workspace.open_file(path)?;
    }

    if print {
        return print_all(workspace);
    }

    // Initialize terminal
    let terminal = Terminal::new()?;
    let mut viewer = Viewer::new(workspace, terminal);
    viewer.run()
}

/// Write every document to stdout with emphasis, no interactive UI
fn print_all(mut workspace: Workspace) -> Result<()> {
    let engine = EmphasisEngine::new(workspace.settings.config.keyword_filter());
    let adapter = EmphasisAdapter::new(engine, Style::bold());
    let mut stdout = io::stdout().lock();

    for idx in 0..workspace.view_count() {
        adapter.refresh(&mut workspace);
        if let Some(view) = workspace.active() {
            if idx > 0 {
                writeln!(stdout)?;
            }
            print_document(&mut stdout, view)?;
        }
        workspace.next_view();
    }
    Ok(())
}

/// Log to a file in the temp dir when `BIONIC_LOG` is set
///
/// The terminal UI owns stdout, so logs never go there.
fn init_logging() -> Result<()> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(());
    };
    let log_path = env::temp_dir().join("bionic-reading.log");
    let file = File::create(&log_path)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn print_usage() {
    println!("bionic {} - bionic reading for source files", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: bionic [OPTIONS] FILE...");
    println!();
    println!("Options:");
    println!("  -p, --print    Print the files with emphasis and exit");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Keys:");
    for (keys, action) in KEY_BINDINGS {
        println!("  {:<22} {}", keys, action.name());
    }
    println!();
    println!("Settings are read from ~/.bionic-reading.toml, table [bionic-reading].");
    println!("Set {}=debug to write a log to the temp directory.", LOG_ENV);
}
