use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::{IsTerminal, stdout};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use jqpanel::config::{self, Config};
use jqpanel::input::InputReader;
use jqpanel::query::{ExecutionGate, JqExecutor, OutputView, QueryController};
use jqpanel::settings::{FileSettings, MemorySettings, SettingsStore, default_settings_path};
use jqpanel::{App, OutputMode};

/// Live JSON query panel
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Live JSON query panel: edit a document and a jq query, see the output as you type"
)]
struct Args {
    /// Input JSON file (if not provided, reads from stdin)
    input: Option<PathBuf>,

    /// Initial jq query
    #[arg(short, long, default_value = ".")]
    query: String,
}

fn main() -> Result<()> {
    // Writes to /tmp/jqpanel-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        use std::io::Write;

        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/jqpanel-debug.log")
            .expect("Failed to open /tmp/jqpanel-debug.log");

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .format(|buf, record| {
                use std::time::SystemTime;
                let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                writeln!(
                    buf,
                    "[{}] [{}] {}",
                    datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .init();

        log::debug!("=== JQPANEL DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    // Load config early to avoid defaults during app initialization
    let config_result = config::load_config();
    let config = config_result.config;

    let args = Args::parse();

    let jq_path = config.jq.resolve()?;
    let document = InputReader::read_document(args.input.as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("jqpanel-worker")
        .enable_all()
        .build()?;

    let executor = JqExecutor::new(jq_path)
        .with_color(config.jq.color)
        .with_timeout(config.jq.timeout());

    let app = build_app(&config, &executor, &runtime, document, args.query);

    let terminal = init_terminal()?;
    let result = run(terminal, app, config_result.warning);

    restore_terminal()?;
    let app = result?;

    runtime.block_on(app.controller.shutdown());

    // Output after terminal restore to prevent corruption
    handle_output(&app, &executor, &runtime);

    #[cfg(debug_assertions)]
    log::debug!("=== JQPANEL DEBUG SESSION ENDED ===");

    Ok(())
}

fn build_app(
    config: &Config,
    executor: &JqExecutor,
    runtime: &Runtime,
    document: String,
    query: String,
) -> App {
    let settings: Box<dyn SettingsStore> = if config.settings.persist {
        Box::new(FileSettings::load(default_settings_path()))
    } else {
        Box::new(MemorySettings::default())
    };

    let gate = ExecutionGate::new(executor.clone(), OutputView::new(), runtime.handle().clone());
    let controller = QueryController::new(gate, settings);

    App::new(controller, document, query, config.jq.color)
}

/// Initialize terminal with raw mode, alternate screen, and bracketed paste
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    match execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste) {
        Ok(_) => {}
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App, warning: Option<String>) -> Result<App> {
    if let Some(warning) = warning {
        app.notify(warning);
    }

    loop {
        // Keep the spinner moving while a run is in flight
        if app.should_render() || app.controller.is_pending() {
            terminal.draw(|frame| app.render(frame))?;
        }

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(app)
}

/// Print the final output or query once the terminal is restored
///
/// The query is run once more so the printed result never depends on a run
/// that was still in flight when the user pressed Enter.
fn handle_output(app: &App, executor: &JqExecutor, runtime: &Runtime) {
    match app.output_mode() {
        Some(OutputMode::Results) => {
            let executor = executor
                .clone()
                .with_color(executor.color() && stdout().is_terminal());
            let request = app.current_request();
            let cancel_token = CancellationToken::new();

            match runtime.block_on(executor.execute_with_cancel(&request, &cancel_token)) {
                Ok(output) if output.success() => {
                    print!("{}", output.stdout);
                    if !output.stderr.is_empty() {
                        eprint!("{}", output.stderr);
                    }
                }
                Ok(output) => eprintln!("Error: {}", output.stderr.trim_end()),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        Some(OutputMode::Query) => {
            println!("{}", app.query_text());
        }
        None => {
            // No output mode (exited with Esc or Ctrl+C)
        }
    }
}
