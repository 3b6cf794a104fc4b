//! Application state and core logic

use crate::config::RosterConfig;
use crate::platform::SHORTCUT_MODIFIER;
use crate::service::{SimulatedUserGateway, UserGateway};
use crate::state::{Action, AppState, Focus, Form, PendingSubmission, SubmitError, UserForm};
use crate::storage::{self, FileStore, KeyValueStore, MemoryStore};
use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};

const CREATED_MESSAGE: &str = "User added successfully!";
const FAILED_MESSAGE: &str = "Error adding user. Please try again.";

/// A create call running on a spawned task
struct InFlight {
    pending: PendingSubmission,
    outcome: oneshot::Receiver<Result<()>>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// The user entry form
    pub form: UserForm,
    /// Runs the create step for each submission
    gateway: Arc<dyn UserGateway>,
    /// Where the user list is persisted
    store: Box<dyn KeyValueStore>,
    in_flight: Option<InFlight>,
    /// Number of users written by the last successful save
    stored_count: usize,
    /// Whether the app should quit
    quit: bool,
    /// Feedback line shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App from configuration
    pub fn new(config: &RosterConfig) -> Result<Self> {
        let gateway = if config.simulate_failure() {
            tracing::info!("Simulated creates will fail");
            Arc::new(SimulatedUserGateway::failing(config.submit_delay()))
        } else {
            Arc::new(SimulatedUserGateway::new(config.submit_delay()))
        };
        let store: Box<dyn KeyValueStore> = match config.data_path() {
            Some(path) => Box::new(FileStore::open(path)?),
            None => {
                tracing::warn!("No data directory available, users will not be saved");
                Box::new(MemoryStore::new())
            }
        };
        Ok(Self::with_parts(
            gateway,
            store,
            AppState::with_theme(config.theme()),
        ))
    }

    /// Assemble an App from explicit collaborators and load stored users
    pub fn with_parts(
        gateway: Arc<dyn UserGateway>,
        store: Box<dyn KeyValueStore>,
        mut state: AppState,
    ) -> Self {
        let mut status_message = None;
        let users = match storage::load_users(store.as_ref()) {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!("Ignoring unreadable stored users: {e}");
                status_message = Some("Stored users could not be read".to_string());
                Vec::new()
            }
        };
        let stored_count = users.len();
        state.dispatch(Action::LoadUsers(users));

        Self {
            state,
            form: UserForm::new(),
            gateway,
            store,
            in_flight: None,
            stored_count,
            quit: false,
            status_message,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_submitting(&self) -> bool {
        self.form.is_submitting()
    }

    pub fn stored_count(&self) -> usize {
        self.stored_count
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('t') if key.modifiers.contains(SHORTCUT_MODIFIER) => {
                self.state.dispatch(Action::ToggleTheme);
                return Ok(());
            }
            KeyCode::Char('l') if key.modifiers.contains(SHORTCUT_MODIFIER) => {
                self.state.focus.toggle();
                return Ok(());
            }
            KeyCode::F(2) => {
                self.state.focus.toggle();
                return Ok(());
            }
            _ => {}
        }

        match self.state.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    /// Handle keys while the form has focus
    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Enter => self.start_submission(),
            KeyCode::Esc => self.quit = true,
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.form.input_char(c)
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys while the user list has focus
    fn handle_list_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(),
            KeyCode::Enter => {
                let selected = self.state.selected_user().cloned();
                if selected.is_some() {
                    self.state.dispatch(Action::SetCurrentUser(selected));
                }
            }
            KeyCode::Esc => self.state.dispatch(Action::SetCurrentUser(None)),
            _ => {}
        }
        Ok(())
    }

    /// Validate the form and, when clean, run the create step on a task
    fn start_submission(&mut self) {
        match self.form.begin_submit() {
            Ok(pending) => {
                let (tx, rx) = oneshot::channel();
                let gateway = Arc::clone(&self.gateway);
                let draft = pending.draft().clone();
                tokio::spawn(async move {
                    let outcome = gateway.create_user(&draft).await;
                    // Receiver only goes away when the app is torn down
                    let _ = tx.send(outcome);
                });
                self.state.dispatch(Action::SetLoading(true));
                self.status_message = None;
                self.in_flight = Some(InFlight {
                    pending,
                    outcome: rx,
                });
            }
            Err(SubmitError::Invalid(errors)) => {
                if let Some(field) = errors.first_field() {
                    self.form.focus_field(field);
                }
                self.status_message = Some(format!("Please fix {} field(s)", errors.len()));
            }
            Err(SubmitError::InFlight) => {}
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Settle the in-flight submission if its create step has finished.
    /// Called once per event loop tick.
    pub fn poll_submission(&mut self) {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return;
        };
        let outcome = match in_flight.outcome.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => Err(anyhow!("create task ended without a result")),
        };
        if let Some(in_flight) = self.in_flight.take() {
            self.finish_submission(in_flight.pending, outcome);
        }
    }

    /// Wait for the in-flight submission, if any, and settle it
    pub async fn wait_for_submission(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            let outcome = in_flight
                .outcome
                .await
                .unwrap_or_else(|_| Err(anyhow!("create task ended without a result")));
            self.finish_submission(in_flight.pending, outcome);
        }
    }

    fn finish_submission(&mut self, pending: PendingSubmission, outcome: Result<()>) {
        self.state.dispatch(Action::SetLoading(false));
        match self.form.settle(pending, outcome) {
            Ok(record) => {
                self.state.dispatch(Action::AddUser(record));
                self.status_message = Some(CREATED_MESSAGE.to_string());
                self.persist_users();
            }
            Err(SubmitError::NotInFlight) => {}
            Err(_) => {
                self.status_message = Some(FAILED_MESSAGE.to_string());
            }
        }
    }

    fn persist_users(&mut self) {
        match storage::save_users(self.store.as_mut(), &self.state.users) {
            Ok(()) => self.stored_count = self.state.users.len(),
            Err(e) => {
                tracing::warn!("Failed to save users: {e}");
                self.status_message = Some(format!("User added but not saved: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockUserGateway;
    use crate::state::{Theme, UserDraft, UserField, UserRecord};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn fill_valid(app: &mut App) {
        type_str(app, "Jane Smith");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_str(app, "jane.smith@example.com");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_str(app, "9876543210");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_str(app, "30");
    }

    fn gateway_ok(times: usize) -> Arc<MockUserGateway> {
        let mut gateway = MockUserGateway::new();
        gateway
            .expect_create_user()
            .times(times)
            .returning(|_| Ok(()));
        Arc::new(gateway)
    }

    fn app_with(gateway: Arc<MockUserGateway>) -> App {
        App::with_parts(gateway, Box::new(MemoryStore::new()), AppState::default())
    }

    fn stored_user(name: &str) -> UserRecord {
        UserRecord::from_draft(UserDraft::trimmed(name, "x@y.io", "1234567890", "33"))
    }

    fn store_with(users: &[UserRecord]) -> Box<MemoryStore> {
        let mut store = MemoryStore::new();
        storage::save_users(&mut store, users).unwrap();
        Box::new(store)
    }

    mod form_keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_typing_fills_fields_in_order() {
            let mut app = app_with(gateway_ok(0));
            fill_valid(&mut app);
            assert_eq!(app.form.value(UserField::Name), "Jane Smith");
            assert_eq!(app.form.value(UserField::Email), "jane.smith@example.com");
            assert_eq!(app.form.value(UserField::Phone), "9876543210");
            assert_eq!(app.form.value(UserField::Age), "30");
            assert!(app.form.is_form_valid());
        }

        #[tokio::test]
        async fn test_backtab_and_backspace() {
            let mut app = app_with(gateway_ok(0));
            type_str(&mut app, "Al");
            app.handle_key(key(KeyCode::BackTab)).unwrap();
            assert_eq!(app.form.active_field(), UserField::Age);
            app.handle_key(key(KeyCode::Up)).unwrap();
            app.handle_key(key(KeyCode::Down)).unwrap();
            app.handle_key(key(KeyCode::Down)).unwrap();
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.form.value(UserField::Name), "A");
        }

        #[tokio::test]
        async fn test_control_chars_are_not_typed() {
            let mut app = app_with(gateway_ok(0));
            app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL))
                .unwrap();
            assert_eq!(app.form.value(UserField::Name), "");
        }

        #[tokio::test]
        async fn test_esc_quits() {
            let mut app = app_with(gateway_ok(0));
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_theme_shortcut() {
            let mut app = app_with(gateway_ok(0));
            app.handle_key(KeyEvent::new(KeyCode::Char('t'), SHORTCUT_MODIFIER))
                .unwrap();
            assert_eq!(app.state.theme, Theme::Dark);
            assert_eq!(app.form.value(UserField::Name), "");
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_invalid_submit_records_errors() {
            let mut app = app_with(gateway_ok(0));
            type_str(&mut app, "Jane Smith");
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert!(!app.is_submitting());
            assert_eq!(app.form.errors().len(), 3);
            assert_eq!(app.form.active_field(), UserField::Email);
            assert_eq!(app.status_message.as_deref(), Some("Please fix 3 field(s)"));
        }

        #[tokio::test]
        async fn test_valid_submit_adds_and_persists_user() {
            let mut app = app_with(gateway_ok(1));
            fill_valid(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.is_submitting());
            assert!(app.state.loading);

            app.wait_for_submission().await;

            assert!(!app.is_submitting());
            assert!(!app.state.loading);
            assert_eq!(app.state.users.len(), 1);
            assert_eq!(app.state.users[0].name(), "Jane Smith");
            assert_eq!(app.stored_count(), 1);
            assert_eq!(app.status_message.as_deref(), Some(CREATED_MESSAGE));
            assert_eq!(app.form.total_chars(), 0);
        }

        #[tokio::test]
        async fn test_enter_while_submitting_is_ignored() {
            let mut app = app_with(gateway_ok(1));
            fill_valid(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            type_str(&mut app, "99");

            app.wait_for_submission().await;
            assert_eq!(app.state.users.len(), 1);
            assert_eq!(app.state.users[0].age(), "30");
        }

        #[tokio::test]
        async fn test_poll_settles_finished_task() {
            let mut app = app_with(gateway_ok(1));
            fill_valid(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();

            for _ in 0..100 {
                tokio::task::yield_now().await;
                app.poll_submission();
                if !app.is_submitting() {
                    break;
                }
            }
            assert!(!app.is_submitting());
            assert_eq!(app.state.users.len(), 1);
        }

        #[tokio::test]
        async fn test_poll_without_submission_is_noop() {
            let mut app = app_with(gateway_ok(0));
            app.poll_submission();
            assert!(app.status_message.is_none());
        }

        #[tokio::test]
        async fn test_failed_create_keeps_values() {
            let mut gateway = MockUserGateway::new();
            gateway
                .expect_create_user()
                .times(1)
                .returning(|_| Err(anyhow!("backend unavailable")));
            let mut app = app_with(Arc::new(gateway));
            fill_valid(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.wait_for_submission().await;

            assert!(app.state.users.is_empty());
            assert_eq!(app.stored_count(), 0);
            assert_eq!(app.status_message.as_deref(), Some(FAILED_MESSAGE));
            assert_eq!(app.form.value(UserField::Name), "Jane Smith");
            assert!(!app.state.loading);
        }

        #[tokio::test]
        async fn test_save_failure_keeps_user_in_memory() {
            let mut store = storage::MockKeyValueStore::new();
            store.expect_get().returning(|_| Ok(None));
            store.expect_set().times(1).returning(|_, _| {
                Err(storage::StorageError::Io(std::io::Error::other("disk full")))
            });
            let mut app = App::with_parts(gateway_ok(1), Box::new(store), AppState::default());
            fill_valid(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.wait_for_submission().await;

            assert_eq!(app.state.users.len(), 1);
            assert_eq!(app.state.users[0].name(), "Jane Smith");
            assert_eq!(app.stored_count(), 0);
            assert_eq!(
                app.status_message.as_deref(),
                Some("User added but not saved: storage I/O failed: disk full")
            );
            assert!(!app.is_submitting());
        }

        #[tokio::test]
        async fn test_users_survive_restart_with_file_store() {
            let path = std::env::temp_dir()
                .join(format!("roster-tui-app-{}", uuid::Uuid::new_v4()))
                .join("store.json");

            let store = Box::new(FileStore::open(&path).unwrap());
            let mut app = App::with_parts(gateway_ok(1), store, AppState::default());
            fill_valid(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.wait_for_submission().await;
            let id = app.state.users[0].id().to_string();

            let store = Box::new(FileStore::open(&path).unwrap());
            let restarted = App::with_parts(gateway_ok(0), store, AppState::default());
            assert_eq!(restarted.state.users.len(), 1);
            assert_eq!(restarted.state.users[0].id(), id);
            assert_eq!(restarted.stored_count(), 1);
        }
    }

    mod startup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_loads_stored_users() {
            let users = vec![stored_user("Ann Lee"), stored_user("Bob Ray")];
            let app = App::with_parts(gateway_ok(0), store_with(&users), AppState::default());
            assert_eq!(app.state.users, users);
            assert_eq!(app.stored_count(), 2);
            assert!(app.status_message.is_none());
        }

        #[tokio::test]
        async fn test_configured_failure_reaches_status_bar() {
            let data_file = std::env::temp_dir()
                .join(format!("roster-tui-fail-{}", uuid::Uuid::new_v4()))
                .join("store.json");
            let config = RosterConfig {
                submit_delay_ms: Some(0),
                data_file: Some(data_file),
                simulate_failure: Some(true),
                ..Default::default()
            };
            let mut app = App::new(&config).unwrap();
            fill_valid(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.wait_for_submission().await;

            assert!(app.state.users.is_empty());
            assert_eq!(app.status_message.as_deref(), Some(FAILED_MESSAGE));
            assert_eq!(app.form.value(UserField::Name), "Jane Smith");
        }

        #[tokio::test]
        async fn test_unreadable_store_starts_empty() {
            let mut store = MemoryStore::new();
            store.set("users", "not json".to_string()).unwrap();
            let app = App::with_parts(gateway_ok(0), Box::new(store), AppState::default());
            assert!(app.state.users.is_empty());
            assert!(app.status_message.is_some());
        }

        #[tokio::test]
        async fn test_configured_theme_is_kept() {
            let app = App::with_parts(
                gateway_ok(0),
                Box::new(MemoryStore::new()),
                AppState::with_theme(Theme::Dark),
            );
            assert_eq!(app.state.theme, Theme::Dark);
        }
    }

    mod list_keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_select_and_clear_current_user() {
            let users = vec![stored_user("Ann Lee"), stored_user("Bob Ray")];
            let mut app = App::with_parts(gateway_ok(0), store_with(&users), AppState::default());

            app.handle_key(key(KeyCode::F(2))).unwrap();
            assert_eq!(app.state.focus, Focus::List);

            app.handle_key(key(KeyCode::Char('j'))).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_user.as_ref(), Some(&users[1]));

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(app.state.current_user.is_none());
            assert!(!app.should_quit());
        }

        #[tokio::test]
        async fn test_enter_on_empty_list_selects_nothing() {
            let mut app = app_with(gateway_ok(0));
            app.handle_key(KeyEvent::new(KeyCode::Char('l'), SHORTCUT_MODIFIER))
                .unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.state.current_user.is_none());
        }

        #[tokio::test]
        async fn test_list_keys_do_not_edit_form() {
            let mut app = app_with(gateway_ok(0));
            app.handle_key(key(KeyCode::F(2))).unwrap();
            type_str(&mut app, "kj");
            assert_eq!(app.form.total_chars(), 0);
        }
    }
}
