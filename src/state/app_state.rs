//! Application state definitions

use super::user::UserRecord;
use serde::{Deserialize, Serialize};

/// Color scheme for the whole UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

/// Which pane receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    List,
}

impl Focus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Form => Self::List,
            Self::List => Self::Form,
        };
    }
}

/// State changes accepted by `AppState::dispatch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddUser(UserRecord),
    SetCurrentUser(Option<UserRecord>),
    ToggleTheme,
    SetLoading(bool),
    LoadUsers(Vec<UserRecord>),
}

/// Shared application state, owned by `App` and changed only through `dispatch`
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub users: Vec<UserRecord>,
    pub current_user: Option<UserRecord>,
    pub theme: Theme,
    pub loading: bool,

    // UI state
    pub focus: Focus,
    pub selected_index: usize,
}

impl AppState {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }

    /// Apply one action
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::AddUser(user) => {
                tracing::debug!("Adding user {} to roster", user.id());
                self.users.push(user);
            }
            Action::SetCurrentUser(user) => {
                self.current_user = user;
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggle();
            }
            Action::SetLoading(loading) => {
                self.loading = loading;
            }
            Action::LoadUsers(users) => {
                self.users = users;
                self.clamp_selection();
            }
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        let max = self.users.len();
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.users.len().saturating_sub(1));
    }

    /// User under the list cursor
    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.users.get(self.selected_index)
    }

    pub fn is_current(&self, user: &UserRecord) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|current| current.id() == user.id())
    }
}
