//! Main event loop: draw, poll input, then advance the timer-driven pieces
//! (console handshake, auto-sync schedule, sync indicator). All mutation
//! happens between polls on this one thread, so timer callbacks can never
//! interleave.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use crate::input::handle_key;
use crate::rendering;
use crate::store::{load_preferences, FileStore, RecordStore};
use crate::types::{now_stamp, AppState};

const POLL_MS: u64 = 33;
const NOTICE_TTL: Duration = Duration::from_secs(4);

pub fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, data_dir: PathBuf) -> io::Result<()> {
    let port = FileStore::new(data_dir)?;
    let prefs = load_preferences(&port);
    let store = RecordStore::open(Box::new(port));
    let mut app = AppState::new(store, prefs);
    info!("nodepilot started");

    loop {
        terminal.draw(|f| rendering::draw(f, &mut app))?;

        if event::poll(Duration::from_millis(POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat => {
                    handle_key(&mut app, key)?;
                }
                // ratatui picks up the new size on the next draw.
                Event::Resize(..) => {}
                _ => {}
            }
        }

        let now = Instant::now();
        if let Some(session) = app.session.as_mut() {
            session.tick(now);
        }
        let guard = app.sync_guard();
        if app.autosync.tick(now, guard) {
            // Silent refresh: stamps and persists, touches no indicator.
            let stamp = now_stamp();
            app.store.touch_all_nodes(&stamp);
        }
        app.flash.tick(now);
        if let Some((_, at)) = &app.notice {
            if at.elapsed() > NOTICE_TTL {
                app.notice = None;
            }
        }

        if app.quit {
            break;
        }
    }
    info!("nodepilot exiting");
    Ok(())
}
