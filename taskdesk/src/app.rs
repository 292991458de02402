//! Application state and event handling.
//!
//! [`App`] is synchronous: key presses and dispatcher events mutate it, and
//! anything that needs the network comes back out as a [`Command`].

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdesk_proto::task::Task;

use crate::dispatch::{Command, Event};
use crate::features::login::LoginForm;
use crate::features::recover::RecoverForm;
use crate::features::register::RegisterForm;
use crate::features::tasks::TaskBoard;
use crate::notify::Toast;
use crate::routes::{self, Route};

/// Default chrono format for task creation dates.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Toasts kept on screen at once; older ones are dropped first.
const MAX_VISIBLE_TOASTS: usize = 4;

/// Focused input on the login/registration screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    /// Email input (default).
    #[default]
    Email,
    /// Password input.
    Password,
}

/// What keys do on the Home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeMode {
    /// Moving through the list.
    Browse,
    /// Typing into the create/edit form.
    Editing,
    /// Waiting for a yes/no on a deletion.
    ConfirmDelete,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    route: Route,
    /// Login screen inputs.
    pub login: LoginForm,
    /// Registration screen inputs.
    pub register: RegisterForm,
    /// Recovery screen inputs.
    pub recover: RecoverForm,
    /// Focused auth input.
    pub field: AuthField,
    /// Task list and Home form state.
    pub board: TaskBoard,
    /// Selected task index.
    pub selected: usize,
    /// Visible toasts, oldest first.
    pub toasts: VecDeque<Toast>,
    /// chrono format for creation dates.
    pub date_format: String,
    /// Frame counter driving the busy spinner.
    pub frame: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app on the login screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            route: Route::Login,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            recover: RecoverForm::default(),
            field: AuthField::Email,
            board: TaskBoard::new(),
            selected: 0,
            toasts: VecDeque::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            frame: 0,
            should_quit: false,
        }
    }

    /// Sets the creation date format.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Screen currently shown. Always guard-resolved.
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Key mode of the Home screen.
    #[must_use]
    pub fn home_mode(&self) -> HomeMode {
        if self.board.pending_delete().is_some() {
            HomeMode::ConfirmDelete
        } else if self.board.form.visible {
            HomeMode::Editing
        } else {
            HomeMode::Browse
        }
    }

    /// Currently selected task.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.board.tasks().get(self.selected)
    }

    /// Moves to `target` after applying its guard.
    ///
    /// Entering Home returns [`Command::LoadTasks`]; leaving it drops the
    /// cached list. Any screen change empties the auth forms.
    pub fn navigate(&mut self, target: Route, authenticated: bool) -> Option<Command> {
        let resolved = routes::resolve(target, authenticated);
        let entering_home = resolved == Route::Home && self.route != Route::Home;

        if resolved != self.route {
            tracing::info!(from = %self.route, to = %resolved, "navigated");
            if self.route == Route::Home {
                self.board.clear();
                self.selected = 0;
            }
            self.clear_auth_forms();
            self.field = AuthField::Email;
            self.route = resolved;
        }

        entering_home.then_some(Command::LoadTasks)
    }

    fn clear_auth_forms(&mut self) {
        self.login = LoginForm::default();
        self.register = RegisterForm::default();
        self.recover = RecoverForm::default();
    }

    /// Re-applies the current route's guard (session may have changed).
    pub fn enforce_guard(&mut self, authenticated: bool) -> Option<Command> {
        self.navigate(self.route, authenticated)
    }

    /// Advances the spinner.
    pub const fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Handle a key event. Returns a command when the action needs the
    /// dispatcher.
    pub fn handle_key_event(&mut self, key: KeyEvent, authenticated: bool) -> Option<Command> {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::F(2), _) => return Some(Command::CycleLanguage),
            _ => {}
        }

        if self.route == Route::Home {
            match self.home_mode() {
                HomeMode::Browse => self.handle_browse_key(key),
                HomeMode::Editing => self.handle_form_key(key),
                HomeMode::ConfirmDelete => self.handle_confirm_key(key),
            }
        } else {
            self.handle_auth_key(key, authenticated)
        }
    }

    /// Handle key event on the login, registration, and recovery screens.
    fn handle_auth_key(&mut self, key: KeyEvent, authenticated: bool) -> Option<Command> {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::F(3) => self.navigate(Route::Login, authenticated),
            KeyCode::F(4) => self.navigate(Route::Register, authenticated),
            KeyCode::F(5) => self.navigate(Route::Recover, authenticated),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.cycle_field();
                None
            }
            KeyCode::Enter => self.submit_auth(),
            KeyCode::Backspace => {
                if let Some(input) = self.focused_input_mut() {
                    input.pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.focused_input_mut() {
                    input.push(c);
                }
                None
            }
            _ => None,
        }
    }

    /// Handle key event while browsing the task list.
    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.board.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('n') => {
                self.board.form.begin_create();
                None
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task().cloned() {
                    self.board.form.begin_edit(&task);
                }
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.selected_task().map(|task| Command::SetTaskStatus {
                    id: task.id.clone(),
                    done: !task.done,
                })
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
                    self.board.request_delete(&id);
                }
                None
            }
            KeyCode::Char('r') => Some(Command::LoadTasks),
            KeyCode::Char('L') => Some(Command::Logout),
            _ => None,
        }
    }

    /// Handle key event while the task form is open.
    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Command> {
        let form = &mut self.board.form;
        match key.code {
            KeyCode::Esc => {
                form.reset();
                None
            }
            KeyCode::Enter => {
                let title = form.title.clone();
                Some(match form.editing.clone() {
                    Some(id) => Command::UpdateTask { id, title },
                    None => Command::CreateTask { title },
                })
            }
            KeyCode::Backspace => {
                form.title.pop();
                None
            }
            KeyCode::Char(c) => {
                form.title.push(c);
                None
            }
            _ => None,
        }
    }

    /// Handle key event while a deletion awaits confirmation.
    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => self
                .board
                .confirm_delete()
                .map(|id| Command::DeleteTask { id }),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.board.cancel_delete();
                None
            }
            _ => None,
        }
    }

    /// Cycle focus between the inputs of the current auth screen.
    const fn cycle_field(&mut self) {
        self.field = match (self.route, self.field) {
            (Route::Recover, _) | (_, AuthField::Password) => AuthField::Email,
            (_, AuthField::Email) => AuthField::Password,
        };
    }

    fn focused_input_mut(&mut self) -> Option<&mut String> {
        match (self.route, self.field) {
            (Route::Login, AuthField::Email) => Some(&mut self.login.email),
            (Route::Login, AuthField::Password) => Some(&mut self.login.password),
            (Route::Register, AuthField::Email) => Some(&mut self.register.email),
            (Route::Register, AuthField::Password) => Some(&mut self.register.password),
            (Route::Recover, _) => Some(&mut self.recover.email),
            (Route::Home, _) => None,
        }
    }

    fn submit_auth(&self) -> Option<Command> {
        match self.route {
            Route::Login => Some(Command::Login(self.login.clone())),
            Route::Register => Some(Command::Register(self.register.clone())),
            Route::Recover => Some(Command::Recover(self.recover.clone())),
            Route::Home => None,
        }
    }

    /// Applies a dispatcher event. May return a follow-up command (entering
    /// Home triggers a load).
    pub fn apply_event(&mut self, event: Event, authenticated: bool) -> Option<Command> {
        match event {
            Event::Navigate(route) => return self.navigate(route, authenticated),
            // Late task results after leaving Home.
            Event::TasksLoaded(_)
            | Event::TaskCreated(_)
            | Event::TaskUpdated(_)
            | Event::TaskStatusChanged(_)
            | Event::TaskDeleted { .. }
                if self.route != Route::Home =>
            {
                tracing::debug!("dropping task event outside home");
            }
            Event::TasksLoaded(tasks) => {
                self.board.replace_all(tasks);
                self.clamp_selection();
            }
            Event::TaskCreated(task) => {
                self.board.append(task);
                self.board.form.reset();
                self.selected = self.board.len().saturating_sub(1);
            }
            Event::TaskUpdated(task) => {
                self.board.replace(task);
                self.board.form.reset();
            }
            Event::TaskStatusChanged(task) => {
                self.board.replace(task);
            }
            Event::TaskDeleted { id } => {
                self.board.remove(&id);
                self.clamp_selection();
            }
            Event::RecoverySent => tracing::debug!("recovery email requested"),
            Event::LanguageChanged(language) => tracing::debug!(%language, "language applied"),
        }
        None
    }

    fn clamp_selection(&mut self) {
        let len = self.board.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Shows a toast, dropping the oldest beyond the visible limit.
    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > MAX_VISIBLE_TOASTS {
            self.toasts.pop_front();
        }
    }

    /// Removes toasts shown for at least `ttl`.
    pub fn expire_toasts(&mut self, now: Instant, ttl: Duration) {
        self.toasts.retain(|t| !t.is_expired(now, ttl));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
