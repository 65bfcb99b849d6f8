//! Interactive task viewer.
//!
//! Event loop, key handling, and the watcher thread that reloads the store
//! when another tm process writes it. Rendering lives in `view`; the pure
//! list helpers live in `model`.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::Result;
use crate::store::TaskStore;
use crate::task::{Filter, Priority, Task, TaskDraft, TaskId};

use super::model;
use super::view;

const EVENT_POLL_MS: u64 = 120;
const WATCH_DEBOUNCE_MS: u64 = 200;

enum UiMsg {
    StoreChanged,
    WatchError(String),
}

pub(crate) struct DeleteConfirm {
    pub(crate) id: TaskId,
    pub(crate) title: String,
}

pub struct AppState {
    pub(crate) store: TaskStore,
    pub(crate) filter: Filter,
    pub(crate) visible: Vec<usize>,
    pub(crate) selected: Option<usize>,
    pub(crate) input: Option<String>,
    pub(crate) confirm_delete: Option<DeleteConfirm>,
    pub(crate) status: Option<String>,
    default_priority: Priority,
}

impl AppState {
    fn new(store: TaskStore, default_priority: Priority) -> Self {
        let mut app = Self {
            store,
            filter: Filter::All,
            visible: Vec::new(),
            selected: None,
            input: None,
            confirm_delete: None,
            status: None,
            default_priority,
        };
        app.reapply(None);
        app
    }

    pub(crate) fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub(crate) fn selected_task(&self) -> Option<&Task> {
        let position = self.selected?;
        let index = *self.visible.get(position)?;
        self.store.tasks().get(index)
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.selected_task().map(|task| task.id.clone())
    }

    fn reapply(&mut self, keep: Option<TaskId>) {
        self.visible = model::visible_indices(self.store.tasks(), self.filter);
        self.selected = model::select_by_id(self.store.tasks(), &self.visible, keep.as_ref());
    }

    fn set_filter(&mut self, filter: Filter) {
        let keep = self.selected_id();
        self.filter = filter;
        self.reapply(keep);
    }

    fn reload(&mut self) {
        let keep = self.selected_id();
        self.store.refresh();
        self.reapply(keep);
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.store.toggle_complete(&id);
        self.reapply(Some(id));
    }

    fn request_delete(&mut self) {
        let Some((id, title)) = self
            .selected_task()
            .map(|task| (task.id.clone(), task.title.clone()))
        else {
            return;
        };
        self.confirm_delete = Some(DeleteConfirm { id, title });
    }

    fn apply_delete(&mut self) {
        if let Some(confirm) = self.confirm_delete.take() {
            self.store.delete_task(&confirm.id);
            self.reapply(None);
            self.status = Some(format!("deleted '{}'", confirm.title));
        }
    }

    fn submit_input(&mut self) {
        let Some(title) = self.input.take() else {
            return;
        };
        let draft = TaskDraft {
            title,
            priority: self.default_priority,
            due_date: None,
        };
        match self.store.add_task(draft, Utc::now()) {
            Some(task) => {
                self.status = Some(format!("added '{}'", task.title));
                self.reapply(Some(task.id));
            }
            None => {
                self.status = Some("title cannot be empty".to_string());
            }
        }
    }

    pub(crate) fn footer_hint(&self) -> String {
        if self.input.is_some() {
            return "type title  enter add  esc cancel".to_string();
        }
        if self.confirm_delete.is_some() {
            return "y confirm delete  esc cancel".to_string();
        }
        "j/k move  space toggle  a add  d delete  1/2/3 filter  t theme  r reload  q quit"
            .to_string()
    }
}

pub fn run(store: TaskStore, default_priority: Priority) -> Result<()> {
    let (ui_tx, ui_rx) = mpsc::channel();
    spawn_watch(store.dir().to_path_buf(), ui_tx);

    let mut app = AppState::new(store, default_priority);
    run_terminal(&mut app, ui_rx)
}

fn run_terminal(app: &mut AppState, ui_rx: Receiver<UiMsg>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app, ui_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    ui_rx: Receiver<UiMsg>,
) -> Result<()> {
    let mut dirty = true;
    loop {
        while let Ok(msg) = ui_rx.try_recv() {
            match msg {
                UiMsg::StoreChanged => app.reload(),
                UiMsg::WatchError(err) => app.status = Some(format!("watch error: {err}")),
            }
            dirty = true;
        }

        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Handle one key press. Returns `true` when the app should quit.
fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.input.is_some() {
        match key.code {
            KeyCode::Esc => app.input = None,
            KeyCode::Enter => app.submit_input(),
            KeyCode::Backspace => {
                if let Some(input) = app.input.as_mut() {
                    input.pop();
                }
            }
            KeyCode::Char(ch) => {
                if let Some(input) = app.input.as_mut() {
                    input.push(ch);
                }
            }
            _ => {}
        }
        return false;
    }

    if app.confirm_delete.is_some() {
        match key.code {
            KeyCode::Char('y') => app.apply_delete(),
            KeyCode::Esc | KeyCode::Char('n') => app.confirm_delete = None,
            _ => {}
        }
        return false;
    }

    app.status = None;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            app.selected = model::move_selection(app.visible.len(), app.selected, 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selected = model::move_selection(app.visible.len(), app.selected, -1);
        }
        KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('a') => app.input = Some(String::new()),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Active),
        KeyCode::Char('3') => app.set_filter(Filter::Completed),
        KeyCode::Char('t') => {
            let dark = !app.store.dark_mode();
            app.store.set_dark_mode(dark);
        }
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
    false
}

fn spawn_watch(store_dir: PathBuf, ui_tx: Sender<UiMsg>) {
    if !store_dir.exists() {
        return;
    }

    thread::spawn(move || {
        let (event_tx, event_rx) = mpsc::channel();
        let watcher: notify::Result<RecommendedWatcher> = notify::recommended_watcher(move |res| {
            let _ = event_tx.send(res);
        });

        let mut watcher = match watcher {
            Ok(watcher) => watcher,
            Err(err) => {
                let _ = ui_tx.send(UiMsg::WatchError(err.to_string()));
                return;
            }
        };

        if watcher.watch(&store_dir, RecursiveMode::NonRecursive).is_err() {
            return;
        }

        let debounce = Duration::from_millis(WATCH_DEBOUNCE_MS);
        let mut pending: Option<Instant> = None;

        loop {
            let timeout = pending
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
                .unwrap_or(Duration::from_secs(3600));
            match event_rx.recv_timeout(timeout) {
                Ok(Ok(_)) => {
                    pending = Some(Instant::now() + debounce);
                }
                Ok(Err(err)) => {
                    let _ = ui_tx.send(UiMsg::WatchError(err.to_string()));
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if pending.is_some() {
                        pending = None;
                        if ui_tx.send(UiMsg::StoreChanged).is_err() {
                            break;
                        }
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
    });
}
