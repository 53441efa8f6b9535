//! Application state management for the voxlog TUI.
//!
//! `App` owns the session pipeline (token store, session context, API
//! client) and the per-view UI state. Network calls run in spawned tasks and
//! report back over an MPSC channel drained once per loop tick; requests are
//! independent and never cancelled.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use voxlog_core::api::{ApiClient, ApiError, RedirectFlag};
use voxlog_core::auth::{Session, TokenStore};
use voxlog_core::config::Config;
use voxlog_core::models::{AuthPayload, Credentials, HistoryEntry, TranscriptionOutcome};
use voxlog_core::routes::{self, Route};

use crate::utils::auth_error_message;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task channel. A handful of in-flight
/// requests is the realistic ceiling for one user.
const CHANNEL_BUFFER_SIZE: usize = 16;

/// Maximum length for the email input field.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for the password input field.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for the upload path input field.
pub const MAX_PATH_LENGTH: usize = 512;

// ============================================================================
// UI State Types
// ============================================================================

/// Overlay state on top of the current route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Which field of the credential form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    Email,
    Password,
    Button,
}

/// Whether a submitted credential form logs in or registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Credential form state, shared by the login and register views
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub focus: AuthFocus,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub busy: bool,
}

impl AuthForm {
    fn with_prefill(email: String, password: String) -> Self {
        let focus = if email.is_empty() {
            AuthFocus::Email
        } else {
            AuthFocus::Password
        };
        Self {
            email,
            password,
            focus,
            error: None,
            notice: None,
            busy: false,
        }
    }
}

/// Upload view state
#[derive(Default)]
pub struct UploadView {
    pub path_input: String,
    pub busy: bool,
    pub error: Option<String>,
    pub outcome: Option<TranscriptionOutcome>,
}

/// History view state
#[derive(Default)]
pub struct HistoryView {
    pub entries: Vec<HistoryEntry>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
    pub selection: usize,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent from spawned request tasks back to the main loop.
enum TaskResult {
    /// An auth endpoint answered (login or register)
    Auth(AuthMode, Result<AuthPayload, ApiError>),
    /// An upload finished
    Upload(Result<TranscriptionOutcome, ApiError>),
    /// The history list arrived
    History(Result<Vec<HistoryEntry>, ApiError>),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub session: Session,
    pub api: ApiClient,
    redirect: RedirectFlag,

    // UI state
    pub state: AppState,
    route: Route,
    pub auth_form: AuthForm,
    pub upload: UploadView,
    pub history: HistoryView,
    pub status_message: Option<String>,

    // Background task channel
    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,
}

impl App {
    /// Create the application around the given token store.
    pub fn new(store: Arc<dyn TokenStore>) -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let session = Session::new(Arc::clone(&store));
        let redirect = RedirectFlag::new();
        let api = ApiClient::new(store, Arc::new(redirect.clone()))?;

        let (task_tx, task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // Prefill the login form from env vars or the saved config
        let email = std::env::var("VOXLOG_EMAIL")
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();
        let password = std::env::var("VOXLOG_PASSWORD").unwrap_or_default();

        let route = if session.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Landing
        };

        Ok(Self {
            config,
            session,
            api,
            redirect,

            state: AppState::Normal,
            route,
            auth_form: AuthForm::with_prefill(email, password),
            upload: UploadView::default(),
            history: HistoryView::default(),
            status_message: None,

            task_rx,
            task_tx,
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to a view, applying the route guard. The guard reads the
    /// session at this moment; denied requests land on the login view and
    /// the requested route is not remembered.
    pub fn navigate(&mut self, requested: Route) {
        let resolved = routes::resolve(requested, &self.session);
        if resolved == Route::History {
            self.load_history();
        }
        self.route = resolved;
    }

    /// The view to render this frame. Re-applies the guard so a logout made
    /// anywhere in the process takes effect on the very next frame.
    pub fn current_view(&self) -> Route {
        routes::resolve(self.route, &self.session)
    }

    /// User-initiated logout: clear the session and return to the landing
    /// view.
    pub fn logout(&mut self) {
        self.session.logout();
        self.upload = UploadView::default();
        self.history = HistoryView::default();
        self.route = Route::Landing;
        self.status_message = Some("Logged out.".to_string());
        info!("User logged out");
    }

    // =========================================================================
    // Request Actions
    // =========================================================================

    /// Submit the credential form for the current view (login or register).
    pub fn submit_auth(&mut self) {
        if self.auth_form.busy {
            return;
        }

        let email = self.auth_form.email.trim().to_string();
        let password = self.auth_form.password.clone();
        if email.is_empty() || password.is_empty() {
            self.auth_form.error = Some("Email and password required".to_string());
            return;
        }

        self.auth_form.error = None;
        self.auth_form.notice = None;
        self.auth_form.busy = true;

        let mode = if self.current_view() == Route::Register {
            AuthMode::Register
        } else {
            AuthMode::Login
        };

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let credentials = Credentials::new(email, password);
            let result = match mode {
                AuthMode::Login => api.login(&credentials).await,
                AuthMode::Register => api.register(&credentials).await,
            };
            Self::send_result(&tx, TaskResult::Auth(mode, result)).await;
        });
    }

    /// Kick off an upload. An empty path is a local error; no request is
    /// issued.
    pub fn submit_upload(&mut self) {
        if self.upload.busy {
            return;
        }

        let path = self.upload.path_input.trim().to_string();
        if path.is_empty() {
            self.upload.error = Some("Select an audio file first.".to_string());
            return;
        }

        self.upload.error = None;
        self.upload.outcome = None;
        self.upload.busy = true;

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = api.upload_audio(Path::new(&path)).await;
            Self::send_result(&tx, TaskResult::Upload(result)).await;
        });
    }

    /// Fetch the history list. No-op while a fetch is already in flight.
    pub fn load_history(&mut self) {
        if self.history.loading {
            return;
        }
        self.history.loading = true;
        self.history.error = None;

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            Self::send_result(&tx, TaskResult::History(api.history().await)).await;
        });
    }

    async fn send_result(tx: &mpsc::Sender<TaskResult>, result: TaskResult) {
        if tx.send(result).await.is_err() {
            error!("Failed to send task result - channel closed");
        }
    }

    // =========================================================================
    // Background Task Processing
    // =========================================================================

    /// Drain finished request tasks, then apply any forced logout a rejected
    /// request latched. Applying the redirect after the results lets the
    /// page that triggered it keep its own inline error.
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.task_rx.try_recv() {
            self.process_task_result(result);
        }

        if self.redirect.take() {
            self.force_login();
        }
    }

    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Auth(mode, result) => self.finish_auth(mode, result),
            TaskResult::Upload(result) => {
                self.upload.busy = false;
                match result {
                    Ok(outcome) => {
                        info!(record_id = ?outcome.record_id, "Upload transcribed");
                        self.upload.outcome = Some(outcome);
                        self.upload.path_input.clear();
                    }
                    Err(e) => {
                        error!(error = %e, "Upload failed");
                        self.upload.error = Some(e.user_message());
                    }
                }
            }
            TaskResult::History(result) => {
                self.history.loading = false;
                self.history.loaded = true;
                match result {
                    Ok(entries) => {
                        self.history.entries = entries;
                        self.history.selection = 0;
                    }
                    Err(e) => {
                        error!(error = %e, "History fetch failed");
                        self.history.error = Some(e.user_message());
                    }
                }
            }
        }
    }

    fn finish_auth(&mut self, mode: AuthMode, result: Result<AuthPayload, ApiError>) {
        self.auth_form.busy = false;
        match result {
            Ok(payload) => match mode {
                AuthMode::Login => match payload.token() {
                    Some(token) => {
                        self.session.login(token.to_string());

                        self.config.last_email = Some(self.auth_form.email.trim().to_string());
                        if let Err(e) = self.config.save() {
                            warn!(error = %e, "Failed to save config");
                        }

                        self.auth_form.password.clear();
                        self.auth_form.error = None;
                        info!("Login successful");
                        self.navigate(Route::Dashboard);
                    }
                    None => {
                        self.auth_form.error = Some(
                            payload
                                .message
                                .unwrap_or_else(|| "Login failed: token not received.".to_string()),
                        );
                    }
                },
                AuthMode::Register => {
                    // Registration never opens a session; hand the user the
                    // login form with the email kept.
                    self.auth_form.password.clear();
                    self.auth_form.notice = Some(payload.message.unwrap_or_else(|| {
                        "Registration successful. Please log in.".to_string()
                    }));
                    self.auth_form.focus = AuthFocus::Password;
                    self.route = Route::Login;
                    info!("Registration accepted");
                }
            },
            Err(e) => {
                error!(error = %e, "Auth request failed");
                self.auth_form.error = Some(auth_error_message(&e));
            }
        }
    }

    /// Hard reset to the login view after the backend rejected the stored
    /// credentials. Idempotent: the store is already clear and landing on
    /// the login view twice is indistinguishable from once.
    fn force_login(&mut self) {
        self.session.logout();
        self.upload = UploadView::default();
        self.history = HistoryView::default();
        if self.route.requires_auth() {
            self.route = Route::Login;
            self.status_message = Some("Session expired. Please log in again.".to_string());
        }
        info!("Forced logout applied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxlog_core::api::Navigator;
    use voxlog_core::auth::MemoryTokenStore;

    fn app_with_store(store: Arc<MemoryTokenStore>) -> App {
        App::new(store).expect("app construction")
    }

    #[test]
    fn empty_upload_path_is_a_local_error() {
        let mut app = app_with_store(Arc::new(MemoryTokenStore::new()));

        app.submit_upload();

        assert_eq!(app.upload.error.as_deref(), Some("Select an audio file first."));
        // No request was dispatched.
        assert!(!app.upload.busy);
    }

    #[test]
    fn guard_redirects_anonymous_navigation() {
        let mut app = app_with_store(Arc::new(MemoryTokenStore::new()));

        app.navigate(Route::Upload);
        assert_eq!(app.current_view(), Route::Login);
    }

    #[test]
    fn guard_reflects_logout_on_next_render_pass() {
        let store = Arc::new(MemoryTokenStore::new());
        store.save("abc123").unwrap();
        let mut app = app_with_store(store);

        app.navigate(Route::Upload);
        assert_eq!(app.current_view(), Route::Upload);

        // Logout elsewhere in the process; no navigation happened, but the
        // next render pass already resolves to the login view.
        app.session.logout();
        assert_eq!(app.current_view(), Route::Login);
    }

    #[test]
    fn forced_logout_is_applied_once_and_idempotently() {
        let store = Arc::new(MemoryTokenStore::new());
        store.save("abc123").unwrap();
        let mut app = app_with_store(store);
        app.navigate(Route::Dashboard);

        // Two concurrent rejections latch the same redirect.
        app.redirect.redirect_to_login();
        app.redirect.redirect_to_login();

        app.check_background_tasks();
        assert_eq!(app.current_view(), Route::Login);
        assert!(!app.session.is_authenticated());
        assert!(app.status_message.as_deref().unwrap_or("").contains("Session expired"));

        // A later tick with nothing latched changes nothing.
        app.status_message = None;
        app.check_background_tasks();
        assert_eq!(app.current_view(), Route::Login);
        assert_eq!(app.status_message, None);
    }
}
