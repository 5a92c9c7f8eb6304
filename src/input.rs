//! Keyboard dispatch. The console overlay owns the keyboard while a session
//! is open; otherwise keys route by the active mode, then by the active view.

use std::io;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::console::{ConsoleSession, Target};
use crate::export;
use crate::form::FormState;
use crate::lang::tr;
use crate::security::{PendingAction, SecurityError};
use crate::types::{
    AppState, ConfirmTarget, Mode, PasswordPrompt, PasswordPurpose, RecordKind, View, now_stamp,
};

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> io::Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return Ok(());
    }
    if app.session.is_some() {
        handle_console_key(app, key);
        return Ok(());
    }
    match app.mode {
        Mode::Normal => handle_normal_key(app, key),
        Mode::Search => handle_search_key(app, key),
        Mode::Form(_) => handle_form_key(app, key),
        Mode::Confirm { .. } => handle_confirm_key(app, key),
        Mode::Password(_) => handle_password_key(app, key),
    }
    Ok(())
}

fn handle_console_key(app: &mut AppState, key: KeyEvent) {
    let Some(session) = app.session.as_mut() else { return };
    match key.code {
        // Escape force-closes even mid-handshake; dropping the session
        // cancels its pending steps.
        KeyCode::Esc => {
            session.close();
            app.session = None;
        }
        KeyCode::Enter => {
            let line = std::mem::take(&mut session.input);
            session.handle_input(&line);
            if session.closed() {
                app.session = None;
            }
        }
        KeyCode::Backspace => {
            session.input.pop();
        }
        KeyCode::Char(c) => {
            if session.ready() {
                session.input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Char(c @ '1'..='5') => {
            switch_view(app, View::ALL[c as usize - '1' as usize]);
        }
        KeyCode::Tab => {
            let idx = View::ALL.iter().position(|v| *v == app.view).unwrap_or(0);
            switch_view(app, View::ALL[(idx + 1) % View::ALL.len()]);
        }
        KeyCode::BackTab => {
            let idx = View::ALL.iter().position(|v| *v == app.view).unwrap_or(0);
            switch_view(app, View::ALL[(idx + View::ALL.len() - 1) % View::ALL.len()]);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected = app.selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let len = app.visible_len();
            if len > 0 && app.selected + 1 < len {
                app.selected += 1;
            }
        }
        KeyCode::Char('/') if app.view.record_kind().is_some() => {
            app.mode = Mode::Search;
        }
        KeyCode::Char('a') if app.view.record_kind().is_some() => {
            app.mode = Mode::Form(match app.view {
                View::Nodes => FormState::node(None),
                View::Wallets => FormState::wallet(None),
                _ => FormState::airdrop(None),
            });
        }
        KeyCode::Char('e') | KeyCode::Enter if app.view.record_kind().is_some() => {
            open_edit(app);
        }
        KeyCode::Char('d') | KeyCode::Delete if app.view.record_kind().is_some() => {
            if let (Some(kind), Some(id)) = (app.view.record_kind(), app.selected_id()) {
                app.mode = Mode::Confirm { target: ConfirmTarget::Delete { kind, id } };
            }
        }
        KeyCode::Char('x') if app.view.record_kind().is_some() => {
            export_current(app);
        }
        KeyCode::Char('c') if app.view == View::Nodes => {
            open_console(app);
        }
        KeyCode::Char('s') if app.view == View::Nodes => {
            if let Some(id) = app.selected_id() {
                let stamp = now_stamp();
                app.store.touch_node(&id, &stamp);
            }
        }
        KeyCode::Char('S') if app.view == View::Nodes => {
            // Visible sync: same refresh as the scheduler, plus the transient
            // indicator. Ignored while the indicator is already up.
            if !app.flash.active() {
                let stamp = now_stamp();
                app.store.touch_all_nodes(&stamp);
                app.flash.raise(Instant::now());
            }
        }
        KeyCode::Char('t') if app.view == View::Nodes => {
            let guard = app.sync_guard();
            app.autosync.toggle(Instant::now(), guard);
        }
        KeyCode::Char('i') if app.view == View::Nodes => {
            let guard = app.sync_guard();
            app.autosync.cycle_interval(Instant::now(), guard);
        }
        KeyCode::Char('l') if app.view == View::Settings => {
            app.prefs.language = app.prefs.language.next();
            app.store.save_preferences(&app.prefs);
        }
        KeyCode::Char('m') if app.view == View::Settings => {
            app.prefs.theme = match app.prefs.theme {
                crate::types::Theme::Dark => crate::types::Theme::Light,
                crate::types::Theme::Light => crate::types::Theme::Dark,
            };
            app.store.save_preferences(&app.prefs);
        }
        KeyCode::Char('p') if app.view == View::Settings => {
            let purpose = if app.gate.is_configured() {
                PasswordPurpose::Change
            } else {
                PasswordPurpose::Set
            };
            app.mode = Mode::Password(PasswordPrompt::new(purpose));
        }
        KeyCode::Char('R') if app.view == View::Settings => {
            request_reset(app);
        }
        _ => {}
    }
}

fn switch_view(app: &mut AppState, view: View) {
    app.view = view;
    app.selected = 0;
    // The guard condition may just have changed; the scheduler must never
    // keep a deadline armed off the nodes view.
    let guard = app.sync_guard();
    app.autosync.rearm(Instant::now(), guard);
}

fn open_edit(app: &mut AppState) {
    let Some(id) = app.selected_id() else { return };
    match app.view {
        View::Nodes => {
            if let Some(n) = app.store.nodes.iter().find(|n| n.id == id) {
                app.mode = Mode::Form(FormState::node(Some(n)));
            }
        }
        View::Wallets => {
            if let Some(w) = app.store.wallets.iter().find(|w| w.id == id) {
                app.mode = Mode::Form(FormState::wallet(Some(w)));
            }
        }
        View::Airdrops => {
            if let Some(a) = app.store.airdrops.iter().find(|a| a.id == id) {
                app.mode = Mode::Form(FormState::airdrop(Some(a)));
            }
        }
        _ => {}
    }
}

fn open_console(app: &mut AppState) {
    let Some(id) = app.selected_id() else { return };
    if let Some(n) = app.store.nodes.iter().find(|n| n.id == id) {
        let target = Target::from_node(n);
        app.session = Some(ConsoleSession::open(target, Instant::now()));
    }
}

fn export_current(app: &mut AppState) {
    let Some(kind) = app.view.record_kind() else { return };
    let result = match kind {
        RecordKind::Nodes => export::write(&app.filtered_nodes(), kind),
        RecordKind::Wallets => export::write(&app.filtered_wallets(), kind),
        RecordKind::Airdrops => export::write(&app.filtered_airdrops(), kind),
    };
    match result {
        Ok(Some(name)) => app.set_notice(format!("Exported {}", name)),
        Ok(None) => {}
        Err(e) => app.set_notice(format!("Export failed: {}", e)),
    }
}

/// Protected-action guard flow: with a password configured the reset is
/// deferred behind verification, otherwise a plain confirmation suffices.
fn request_reset(app: &mut AppState) {
    if app.gate.is_configured() {
        app.pending = Some(PendingAction::ResetAllData);
        app.mode = Mode::Password(PasswordPrompt::new(PasswordPurpose::Verify));
    } else {
        app.mode = Mode::Confirm { target: ConfirmTarget::Reset };
    }
}

fn reset_all_data(app: &mut AppState) {
    app.store.reset_all();
    app.selected = 0;
    let msg = tr(app.prefs.language, "resetSuccess").to_string();
    app.set_notice(msg);
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            app.search.pop();
            app.clamp_selection();
        }
        KeyCode::Char(c) => {
            app.search.push(c);
            app.clamp_selection();
        }
        _ => {}
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    let Mode::Form(form) = &mut app.mode else { return };
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
        }
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => form.cycle_choice(false),
        KeyCode::Right => form.cycle_choice(true),
        KeyCode::Backspace => {
            let field = &mut form.fields[form.focus];
            if field.choices.is_none() {
                field.value.pop();
            }
        }
        KeyCode::Char(c) => {
            let field = &mut form.fields[form.focus];
            if field.choices.is_none() {
                field.value.push(c);
            }
        }
        KeyCode::Enter => save_form(app),
        _ => {}
    }
}

fn save_form(app: &mut AppState) {
    let Mode::Form(form) = std::mem::replace(&mut app.mode, Mode::Normal) else { return };
    match form.kind {
        RecordKind::Nodes => {
            let existing = form.editing.as_ref()
                .and_then(|id| app.store.nodes.iter().find(|n| &n.id == id))
                .cloned();
            let rec = form.to_node(existing.as_ref());
            app.store.upsert_node(rec);
        }
        RecordKind::Wallets => {
            let existing = form.editing.as_ref()
                .and_then(|id| app.store.wallets.iter().find(|w| &w.id == id))
                .cloned();
            let rec = form.to_wallet(existing.as_ref());
            app.store.upsert_wallet(rec);
        }
        RecordKind::Airdrops => {
            let existing = form.editing.as_ref()
                .and_then(|id| app.store.airdrops.iter().find(|a| &a.id == id))
                .cloned();
            let rec = form.to_airdrop(existing.as_ref());
            app.store.upsert_airdrop(rec);
        }
    }
    app.clamp_selection();
}

fn handle_confirm_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let Mode::Confirm { target } = std::mem::replace(&mut app.mode, Mode::Normal) else { return };
            match target {
                ConfirmTarget::Delete { kind, id } => {
                    app.store.delete(kind, &id);
                    app.clamp_selection();
                }
                ConfirmTarget::Reset => reset_all_data(app),
            }
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

/// Focusable field slots per dialog purpose: current / new / confirm.
fn focus_slots(purpose: PasswordPurpose) -> &'static [usize] {
    match purpose {
        PasswordPurpose::Verify => &[0],
        PasswordPurpose::Set => &[1, 2],
        PasswordPurpose::Change => &[0, 1, 2],
    }
}

fn handle_password_key(app: &mut AppState, key: KeyEvent) {
    let Mode::Password(prompt) = &mut app.mode else { return };
    match key.code {
        KeyCode::Esc => {
            // Cancel discards any deferred action without firing it.
            app.pending = None;
            app.mode = Mode::Normal;
        }
        KeyCode::Tab | KeyCode::Down => step_focus(prompt, true),
        KeyCode::BackTab | KeyCode::Up => step_focus(prompt, false),
        KeyCode::Backspace => {
            focused_field(prompt).pop();
        }
        KeyCode::Char(c) => {
            focused_field(prompt).push(c);
        }
        KeyCode::Enter => submit_password(app),
        _ => {}
    }
}

fn step_focus(prompt: &mut PasswordPrompt, forward: bool) {
    let slots = focus_slots(prompt.purpose);
    let pos = slots.iter().position(|s| *s == prompt.focus).unwrap_or(0);
    let next = if forward {
        (pos + 1) % slots.len()
    } else {
        (pos + slots.len() - 1) % slots.len()
    };
    prompt.focus = slots[next];
}

fn focused_field(prompt: &mut PasswordPrompt) -> &mut String {
    match prompt.focus {
        0 => &mut prompt.current,
        1 => &mut prompt.new,
        _ => &mut prompt.confirm,
    }
}

fn error_key(e: SecurityError) -> &'static str {
    match e {
        SecurityError::Validation => "passRequirement",
        SecurityError::Auth => "passIncorrect",
        SecurityError::Mismatch => "passMismatch",
    }
}

fn submit_password(app: &mut AppState) {
    let Mode::Password(prompt) = &mut app.mode else { return };
    prompt.error = None;
    match prompt.purpose {
        PasswordPurpose::Set => match app.gate.set(&prompt.new, &prompt.confirm) {
            Ok(()) => {
                app.prefs.password = app.gate.stored().map(|s| s.to_string());
                app.store.save_preferences(&app.prefs);
                app.mode = Mode::Normal;
                app.set_notice("Password set successfully.");
            }
            Err(e) => prompt.error = Some(error_key(e)),
        },
        PasswordPurpose::Change => {
            match app.gate.change(&prompt.current, &prompt.new, &prompt.confirm) {
                Ok(()) => {
                    app.prefs.password = app.gate.stored().map(|s| s.to_string());
                    app.store.save_preferences(&app.prefs);
                    app.mode = Mode::Normal;
                    app.set_notice("Password updated successfully.");
                }
                Err(e) => prompt.error = Some(error_key(e)),
            }
        }
        PasswordPurpose::Verify => match app.gate.verify(&prompt.current) {
            Ok(()) => {
                app.mode = Mode::Normal;
                // Fire the deferred action exactly once, then drop it.
                if let Some(action) = app.pending.take() {
                    info!(?action, "protected action verified");
                    match action {
                        PendingAction::ResetAllData => reset_all_data(app),
                    }
                }
            }
            Err(e) => prompt.error = Some(error_key(e)),
        },
    }
}
