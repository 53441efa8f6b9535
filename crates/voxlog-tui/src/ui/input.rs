//! Keyboard input handling for the TUI.
//!
//! Keys are dispatched overlay-first, then to the active view. Views with
//! text fields (the credential form and the upload path) own the keyboard
//! while they are on screen; everything else shares the global bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use voxlog_core::routes::Route;

use crate::app::{
    App, AppState, AuthFocus, MAX_EMAIL_LENGTH, MAX_PASSWORD_LENGTH, MAX_PATH_LENGTH,
};

/// Handle one key event. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            app.state = AppState::Normal;
        }
        return false;
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    match app.current_view() {
        Route::Login | Route::Register => handle_auth_input(app, key),
        Route::Upload => handle_upload_input(app, key),
        _ => handle_global_input(app, key),
    }
}

fn handle_global_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('1') => app.navigate(Route::Landing),
        KeyCode::Char('2') => app.navigate(Route::Dashboard),
        KeyCode::Char('3') => app.navigate(Route::Upload),
        KeyCode::Char('4') => app.navigate(Route::History),
        KeyCode::Char('l') if !app.session.is_authenticated() => app.navigate(Route::Login),
        KeyCode::Char('r') if !app.session.is_authenticated() => app.navigate(Route::Register),
        KeyCode::Char('o') if app.session.is_authenticated() => app.logout(),
        KeyCode::Char('u') if app.current_view() == Route::History => app.load_history(),
        KeyCode::Up if app.current_view() == Route::History => {
            app.history.selection = app.history.selection.saturating_sub(1);
        }
        KeyCode::Down if app.current_view() == Route::History => {
            let last = app.history.entries.len().saturating_sub(1);
            app.history.selection = (app.history.selection + 1).min(last);
        }
        _ => {}
    }
    false
}

fn handle_auth_input(app: &mut App, key: KeyEvent) -> bool {
    // Ctrl+R toggles between the login and register forms
    if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
        let target = if app.current_view() == Route::Login {
            Route::Register
        } else {
            Route::Login
        };
        app.auth_form.error = None;
        app.auth_form.notice = None;
        app.navigate(target);
        return false;
    }

    match key.code {
        KeyCode::Esc => app.navigate(Route::Landing),
        KeyCode::Tab | KeyCode::Down => {
            app.auth_form.focus = match app.auth_form.focus {
                AuthFocus::Email => AuthFocus::Password,
                AuthFocus::Password => AuthFocus::Button,
                AuthFocus::Button => AuthFocus::Email,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.auth_form.focus = match app.auth_form.focus {
                AuthFocus::Email => AuthFocus::Button,
                AuthFocus::Password => AuthFocus::Email,
                AuthFocus::Button => AuthFocus::Password,
            };
        }
        KeyCode::Enter => match app.auth_form.focus {
            AuthFocus::Email => app.auth_form.focus = AuthFocus::Password,
            AuthFocus::Password | AuthFocus::Button => app.submit_auth(),
        },
        KeyCode::Backspace => match app.auth_form.focus {
            AuthFocus::Email => {
                app.auth_form.email.pop();
            }
            AuthFocus::Password => {
                app.auth_form.password.pop();
            }
            AuthFocus::Button => {}
        },
        KeyCode::Char(c) if !c.is_control() => match app.auth_form.focus {
            AuthFocus::Email if app.auth_form.email.len() < MAX_EMAIL_LENGTH => {
                app.auth_form.email.push(c);
            }
            AuthFocus::Password if app.auth_form.password.len() < MAX_PASSWORD_LENGTH => {
                app.auth_form.password.push(c);
            }
            _ => {}
        },
        _ => {}
    }
    false
}

fn handle_upload_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => app.navigate(Route::Dashboard),
        KeyCode::Enter => app.submit_upload(),
        KeyCode::Backspace => {
            app.upload.path_input.pop();
        }
        KeyCode::Char(c) if !c.is_control() && app.upload.path_input.len() < MAX_PATH_LENGTH => {
            app.upload.path_input.push(c);
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyEvent;

    use super::*;
    use voxlog_core::auth::MemoryTokenStore;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::from(code))
    }

    #[test]
    fn quit_requires_confirmation() {
        let mut app = App::new(Arc::new(MemoryTokenStore::new())).unwrap();

        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state, AppState::ConfirmingQuit);

        assert!(!press(&mut app, KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Normal);

        press(&mut app, KeyCode::Char('q'));
        assert!(press(&mut app, KeyCode::Char('y')));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn typing_fills_the_focused_auth_field() {
        let mut app = App::new(Arc::new(MemoryTokenStore::new())).unwrap();
        app.navigate(Route::Login);
        app.auth_form.email.clear();
        app.auth_form.password.clear();
        app.auth_form.focus = AuthFocus::Email;

        for c in "a@b.co".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.auth_form.email, "a@b.co");

        press(&mut app, KeyCode::Tab);
        for c in "hunter2".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.auth_form.password, "hunter2");
        assert_eq!(app.auth_form.email, "a@b.co");
    }

    #[test]
    fn protected_navigation_keys_land_on_login_when_anonymous() {
        let mut app = App::new(Arc::new(MemoryTokenStore::new())).unwrap();

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_view(), Route::Login);
    }
}
