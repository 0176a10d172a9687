//! Application state for the terminal UI
//!
//! One `App` instance owns all mutable view state: the current screen, the
//! login form fields, the fetched transaction list and the loading flags.
//! Network calls run to completion on the runtime the event loop holds, so
//! state is only ever touched from the UI thread.

use ratatui::style::Color;
use tokio::runtime::Runtime;

use crate::api::{AuthService, TransactionService};
use crate::config::Config;
use crate::model::Transaction;
use crate::session::SessionStore;

/// Which view is showing
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

/// Active field of the login form
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// UI color theme, persisted under the `theme` session key
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn text(&self) -> Color {
        match self {
            Theme::Light => Color::Black,
            Theme::Dark => Color::White,
        }
    }

    pub fn muted(&self) -> Color {
        match self {
            Theme::Light => Color::DarkGray,
            Theme::Dark => Color::Gray,
        }
    }

    pub fn background(&self) -> Color {
        match self {
            Theme::Light => Color::White,
            Theme::Dark => Color::Reset,
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub theme: Theme,

    // Login form
    pub email: String,
    pub password: String,
    pub field: LoginField,
    pub logging_in: bool,
    pub needs_login: bool,

    // Dashboard view state
    pub transactions: Vec<Transaction>,
    pub loading: bool,
    pub needs_fetch: bool,

    pub should_quit: bool,

    auth: AuthService,
    service: TransactionService,
    session: SessionStore,
}

impl App {
    pub fn new(config: &Config, session: SessionStore) -> Self {
        let theme = Theme::from_name(session.theme().as_deref());

        // Missing token routes to the login view; the server remains the
        // real authority on whether a stored token is still good.
        let (screen, needs_fetch) = match session.access_token() {
            Some(_) => (Screen::Dashboard, true),
            None => (Screen::Login, false),
        };

        Self {
            screen,
            theme,
            email: String::new(),
            password: String::new(),
            field: LoginField::Email,
            logging_in: false,
            needs_login: false,
            transactions: Vec::new(),
            loading: needs_fetch,
            needs_fetch,
            should_quit: false,
            auth: AuthService::new(&config.api.base_url),
            service: TransactionService::new(&config.api.base_url, session.clone()),
            session,
        }
    }

    /// Queue the login call for the event loop, so the "Entrando..."
    /// frame is drawn before the request blocks the loop.
    pub fn request_login(&mut self) {
        self.logging_in = true;
        self.needs_login = true;
    }

    /// Submit the login form. On success the tokens are stored and the
    /// dashboard takes over; on failure the error is logged and the form
    /// stays as-is, no message shown.
    pub fn submit_login(&mut self, rt: &Runtime) {
        match rt.block_on(self.auth.login(&self.email, &self.password)) {
            Ok(response) => {
                if let Err(e) = self.session.set_tokens(&response.token, &response.refresh_token)
                {
                    tracing::error!("Failed to persist session tokens: {}", e);
                }
                self.password.clear();
                self.screen = Screen::Dashboard;
                self.loading = true;
                self.needs_fetch = true;
            }
            Err(e) => {
                tracing::error!("Login failed: {}", e);
            }
        }

        self.logging_in = false;
    }

    /// Fetch the transaction list. Failures leave the previous list in
    /// place and only reach the log.
    pub fn fetch_transactions(&mut self, rt: &Runtime) {
        self.loading = true;

        match rt.block_on(self.service.list()) {
            Ok(page) => {
                tracing::debug!("Fetched {} of {} transactions", page.data.len(), page.total);
                self.transactions = page.data;
            }
            Err(e) => {
                tracing::error!("Failed to fetch transactions: {}", e);
            }
        }

        self.loading = false;
    }

    /// Drop the session and return to the login form.
    pub fn logout(&mut self) {
        if let Err(e) = self.session.clear() {
            tracing::error!("Failed to clear session: {}", e);
        }
        self.transactions.clear();
        self.email.clear();
        self.password.clear();
        self.field = LoginField::Email;
        self.screen = Screen::Login;
    }

    /// Flip light/dark and persist the preference.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(e) = self.session.set_theme(self.theme.name()) {
            tracing::error!("Failed to persist theme: {}", e);
        }
    }

    pub fn next_login_field(&mut self) {
        self.field = match self.field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn active_field_mut(&mut self) -> &mut String {
        match self.field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}
