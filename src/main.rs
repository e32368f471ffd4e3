use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use drawguess::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore, Overrides},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    timer::TICK_INTERVAL,
    ui,
    words::BundledList,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// draw the secret word before the clock runs out, then guess it
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A draw-and-guess word game for the terminal. Draw with the mouse (left button draws, right button erases), undo strokes, and type your guess before the countdown ends."
)]
pub struct Cli {
    /// number of seconds in a round
    #[clap(short = 's', long)]
    secs: Option<u32>,

    /// word list file, one word per line
    #[clap(short = 'w', long, value_name = "FILE", conflicts_with = "list")]
    words: Option<PathBuf>,

    /// bundled word list to pick from
    #[clap(short = 'l', long, value_enum)]
    list: Option<BundledList>,

    /// initial pen thickness (1-10)
    #[clap(short = 't', long, value_parser = clap::value_parser!(u8).range(1..=10))]
    thickness: Option<u8>,

    /// read settings from this file instead of the default config location
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// save the effective settings to the config file and exit
    #[clap(long)]
    write_config: bool,
}

impl Cli {
    fn to_overrides(&self) -> Overrides {
        Overrides {
            time_limit_secs: self.secs,
            thickness: self.thickness,
            word_file: self.words.clone(),
            word_list: self.list,
        }
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_path) = AppDirs::log_path() {
        logging::init(&log_path);
    }

    let store = cli.config_store();
    let config: Config = store.load().with_overrides(cli.to_overrides());

    if cli.write_config {
        store.save(&config)?;
        println!("settings written to {}", store.path().display());
        return Ok(());
    }

    // a missing or empty word list ends the session before the screen is taken over
    let words = match config.load_words() {
        Ok(words) => words,
        Err(err) => {
            log::error!("{err}");
            Cli::command().error(ErrorKind::Io, err).exit();
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let result = App::new(config, words, Rect::new(0, 0, size.width, size.height))
        .map_err(|err| Box::new(err) as Box<dyn Error>)
        .and_then(|mut app| start_tui(&mut terminal, &mut app));

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("session ended with an error: {err}");
    }
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(TICK_INTERVAL));

    terminal.draw(|f| ui::draw(app, f))?;

    while !app.should_quit {
        // a new round gets a full first second; ticking stops once the countdown expires
        if app.take_round_started() {
            runner.restart_ticks();
        }
        runner.set_ticking(app.wants_ticks());

        let Some(event) = runner.step() else {
            break;
        };
        app.handle(event);

        terminal.draw(|f| ui::draw(app, f))?;
    }

    Ok(())
}
