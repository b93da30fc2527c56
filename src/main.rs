use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lexafrica_prep::app::App;
use lexafrica_prep::bank::load_bank;
use lexafrica_prep::chat::ReplyResolver;
use lexafrica_prep::chat_worker::{spawn_chat_worker, ChatRequest, ChatResponse};
use lexafrica_prep::config::AppConfig;
use lexafrica_prep::db::{self, settings::load_onboarding};
use lexafrica_prep::{input, logger, ui};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

fn main() -> io::Result<()> {
    logger::init();
    logger::log("Starting LexAfrica exam prep");

    let config = AppConfig::from_env();
    let (bank, bank_errors) = load_bank(&config.questions_dir);
    logger::log(&format!("Question bank ready with {} questions", bank.len()));

    let conn = match db::init_db() {
        Ok(conn) => Some(conn),
        Err(e) => {
            logger::log(&format!("Database unavailable, progress will not be saved: {}", e));
            None
        }
    };
    let onboarding = conn
        .as_ref()
        .and_then(|c| load_onboarding(c).ok())
        .unwrap_or_default();

    let resolver = Arc::new(ReplyResolver::from_config(&config));
    let (request_tx, request_rx) = mpsc::channel::<ChatRequest>();
    let (reply_tx, reply_rx) = mpsc::channel::<ChatResponse>();
    let chat_tx = match spawn_chat_worker(resolver, reply_tx, request_rx) {
        Ok(_) => Some(request_tx),
        Err(e) => {
            logger::log(&format!("Failed to spawn chat worker: {}", e));
            None
        }
    };

    let mut app = App::new(config, bank, conn, onboarding, chat_tx);
    app.bank_warnings = bank_errors.iter().map(|e| e.to_string()).collect();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &reply_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    logger::log("Exiting");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    reply_rx: &mpsc::Receiver<ChatResponse>,
) -> io::Result<()> {
    loop {
        loop {
            match reply_rx.try_recv() {
                Ok(response) => app.on_chat_response(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    app.on_chat_worker_gone();
                    break;
                }
            }
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
