//! Key-event dispatch: the modal state machine transitions.
//!
//! Every event goes through [`App::handle_key`], which routes it to the
//! handler of the active modal. Handlers mutate the session state and may
//! return an [`Action`] for the event loop; anything that does not match is
//! a silent no-op.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use shelf_core::placeholder;

use super::state::{Action, App, ConfirmDialog, InputForm, Modal};

impl App {
    /// Handles one resolved key event and returns what the event loop
    /// should do beyond the state update.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match self.modal {
            Modal::None => self.handle_navigation_key(key),
            Modal::Help => self.handle_help_key(key),
            Modal::Confirm(_) => self.handle_confirm_key(key),
            Modal::Input(_) => self.handle_input_key(key),
        }
    }

    fn handle_navigation_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let row_count = self.visible_rows().len();
                if self.cursor + 1 < row_count {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('r') => return self.activate_selected(),
            KeyCode::Char('e') => return Some(Action::EditConfig),
            KeyCode::Char('?') => self.modal = Modal::Help,
            // No modal open: back means quit
            KeyCode::Esc => return Some(Action::Quit),
            _ => {}
        }
        None
    }

    /// Activates the node under the cursor: folders toggle, leaves either
    /// open the parameter form, open the confirm dialog, or run directly.
    fn activate_selected(&mut self) -> Option<Action> {
        let rows = self.visible_rows();
        let path = rows.get(self.cursor)?.path.clone();
        let node = self.tree.root_mut().node_at_mut(&path)?;

        if node.is_folder() {
            // The synthetic root stays expanded
            if !path.is_empty() {
                node.expanded = !node.expanded;
                self.clamp_cursor();
            }
            return None;
        }

        if node.command.is_empty() {
            return None;
        }

        if !placeholder::extract(&node.command).is_empty() {
            self.modal = Modal::Input(InputForm::for_node(node));
            return None;
        }

        if node.confirm {
            self.modal = Modal::Confirm(ConfirmDialog::new(node.name.clone(), node.command.clone()));
            None
        } else {
            Some(Action::Run(node.command.clone()))
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc => self.modal = Modal::None,
            _ => {}
        }
        None
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<Action> {
        let Modal::Confirm(dialog) = &mut self.modal else {
            return None;
        };

        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                dialog.yes = !dialog.yes;
            }
            KeyCode::Enter => {
                let accepted = dialog.yes;
                let command = std::mem::take(&mut dialog.command);
                self.modal = Modal::None;
                if accepted {
                    return Some(Action::Run(command));
                }
            }
            KeyCode::Esc => self.modal = Modal::None,
            _ => {}
        }
        None
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Action> {
        let Modal::Input(form) = &mut self.modal else {
            return None;
        };

        match key.code {
            KeyCode::Esc => self.modal = Modal::None,
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_previous(),
            KeyCode::Up => form.move_up(),
            KeyCode::Down => form.move_down(),
            KeyCode::Enter => return self.submit_input_form(),
            KeyCode::Char(c) => form.insert_char(c),
            KeyCode::Backspace => form.backspace(),
            _ => {}
        }
        None
    }

    /// Submits the parameter form if every field is filled; otherwise a
    /// silent no-op that leaves the form (and its values) untouched.
    fn submit_input_form(&mut self) -> Option<Action> {
        let Modal::Input(form) = &self.modal else {
            return None;
        };

        if !form.is_complete() {
            return None;
        }

        let Modal::Input(form) = std::mem::take(&mut self.modal) else {
            return None;
        };

        let command = placeholder::substitute(&form.template, &form.values());

        if form.confirm {
            self.modal = Modal::Confirm(ConfirmDialog::new(form.node_name, command));
            None
        } else {
            Some(Action::Run(command))
        }
    }
}
