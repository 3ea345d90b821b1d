//! Session state types for the interactive application.
//!
//! The session is an explicit state machine: [`App`] holds the navigation
//! cursor plus at most one active [`Modal`], and every key event is routed
//! to exactly one handler based on that modal. Parameter input fields are a
//! tagged variant ([`FieldKind`]) so choice and free-text fields carry only
//! the state they actually use.

use shelf_core::config::{VariableConfig, VariableOption};
use shelf_core::placeholder;
use shelf_core::tree::{CommandNode, CommandTree, VisibleRow};
use std::collections::HashMap;

/// Option value that marks the free-text escape hatch of a choice field.
pub const CUSTOM_OPTION_VALUE: &str = "custom";

/// What the event loop should do after a key event, beyond state updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hand the literal command line to the shell.
    Run(String),
    /// Open the configuration file in an external editor.
    EditConfig,
    /// Terminate the session.
    Quit,
}

/// A single-line text buffer with explicit focus state.
///
/// Text-entry events are only accepted while focused, so routing stays
/// unambiguous when several buffers exist in one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
    focused: bool,
}

impl TextBuffer {
    #[must_use]
    pub fn with_value(value: String) -> Self {
        Self {
            value,
            focused: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn insert(&mut self, c: char) {
        if self.focused {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.focused {
            self.value.pop();
        }
    }
}

/// State of a choice field: an option list with an optional custom override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceState {
    pub options: Vec<VariableOption>,
    pub index: usize,
    /// True while the selected option is the custom sentinel and the
    /// secondary buffer owns text entry. Cleared when a vertical move
    /// leaves the field, so the option list is navigable on return.
    pub custom_active: bool,
    pub custom: TextBuffer,
}

impl ChoiceState {
    pub(crate) fn new(options: Vec<VariableOption>, default: Option<&str>) -> Self {
        let index = default
            .and_then(|default| options.iter().position(|opt| opt.value == default))
            .unwrap_or(0);

        let mut choice = Self {
            options,
            index,
            custom_active: false,
            custom: TextBuffer::default(),
        };
        // Override state is derived up front; focus only arrives when the
        // field itself is focused
        choice.custom_active = choice.is_custom_selected();
        choice
    }

    /// The value of the currently selected option.
    #[must_use]
    pub fn selected_value(&self) -> &str {
        self.options
            .get(self.index)
            .map_or("", |opt| opt.value.as_str())
    }

    #[must_use]
    pub fn is_custom_selected(&self) -> bool {
        self.selected_value() == CUSTOM_OPTION_VALUE
    }

    /// Re-derives the custom override from the current selection and moves
    /// buffer focus accordingly.
    pub fn sync_custom_override(&mut self) {
        self.custom_active = self.is_custom_selected();
        if self.custom_active {
            self.custom.focus();
        } else {
            self.custom.blur();
        }
    }
}

/// The two shapes a parameter input field can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text(TextBuffer),
    Choice(ChoiceState),
}

/// One input field of the parameter form, tied to a placeholder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub name: String,
    pub kind: FieldKind,
}

impl InputField {
    /// Builds a field for a placeholder, using its variable spec if one
    /// exists. Placeholders without a spec become plain text fields with no
    /// default.
    fn for_variable(name: &str, spec: Option<&VariableConfig>) -> Self {
        let kind = match spec {
            Some(spec) if !spec.options.is_empty() => FieldKind::Choice(ChoiceState::new(
                spec.options.clone(),
                spec.default.as_deref(),
            )),
            Some(spec) => FieldKind::Text(TextBuffer::with_value(
                spec.default.clone().unwrap_or_default(),
            )),
            None => FieldKind::Text(TextBuffer::default()),
        };

        Self {
            name: name.to_string(),
            kind,
        }
    }

    /// Focuses the field's active buffer, if it has one. A choice field
    /// without the custom override has no buffer; its option list is driven
    /// by the form cursor alone.
    pub fn focus(&mut self) {
        match &mut self.kind {
            FieldKind::Text(buffer) => buffer.focus(),
            FieldKind::Choice(choice) => {
                if choice.custom_active {
                    choice.custom.focus();
                }
            }
        }
    }

    pub fn blur(&mut self) {
        match &mut self.kind {
            FieldKind::Text(buffer) => buffer.blur(),
            FieldKind::Choice(choice) => choice.custom.blur(),
        }
    }

    /// Whether the field holds a usable value for submission.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match &self.kind {
            FieldKind::Text(buffer) => !buffer.value().trim().is_empty(),
            FieldKind::Choice(choice) => {
                if choice.is_custom_selected() {
                    !choice.custom.value().trim().is_empty()
                } else {
                    !choice.selected_value().is_empty()
                }
            }
        }
    }

    /// The field's effective value: the custom buffer when the sentinel
    /// option is selected, the option value or text buffer otherwise.
    #[must_use]
    pub fn value(&self) -> String {
        match &self.kind {
            FieldKind::Text(buffer) => buffer.value().to_string(),
            FieldKind::Choice(choice) => {
                if choice.is_custom_selected() {
                    choice.custom.value().to_string()
                } else {
                    choice.selected_value().to_string()
                }
            }
        }
    }
}

/// The parameter-input form, created fresh for each invocation of a
/// parameterized command and discarded on submit or cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputForm {
    pub node_name: String,
    pub template: String,
    /// Confirm flag of the invoking node, captured at open time.
    pub confirm: bool,
    pub fields: Vec<InputField>,
    pub cursor: usize,
}

impl InputForm {
    /// Builds the form for a leaf node whose command has placeholders.
    /// Field order follows placeholder extraction order.
    #[must_use]
    pub fn for_node(node: &CommandNode) -> Self {
        let fields: Vec<InputField> = placeholder::extract(&node.command)
            .iter()
            .map(|name| InputField::for_variable(name, node.variable(name)))
            .collect();

        let mut form = Self {
            node_name: node.name.clone(),
            template: node.command.clone(),
            confirm: node.confirm,
            fields,
            cursor: 0,
        };

        if let Some(first) = form.fields.first_mut() {
            first.focus();
        }
        form
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.fields.iter().all(InputField::is_complete)
    }

    /// Collects the submitted name→value map.
    #[must_use]
    pub fn values(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.value()))
            .collect()
    }

    /// Moves focus to the next field, blurring the current one. No-op at
    /// the last field.
    pub fn focus_next(&mut self) {
        if self.cursor + 1 < self.fields.len() {
            self.fields[self.cursor].blur();
            self.cursor += 1;
            self.fields[self.cursor].focus();
        }
    }

    /// Moves focus to the previous field, blurring the current one. No-op
    /// at the first field.
    pub fn focus_previous(&mut self) {
        if self.cursor > 0 {
            self.fields[self.cursor].blur();
            self.cursor -= 1;
            self.fields[self.cursor].focus();
        }
    }

    /// Handles a down event: advances within a choice field's option list,
    /// or moves to the next field from the last option, a text field, or an
    /// active custom override.
    pub fn move_down(&mut self) {
        let has_next = self.cursor + 1 < self.fields.len();
        if let Some(field) = self.fields.get_mut(self.cursor) {
            if let FieldKind::Choice(choice) = &mut field.kind {
                if !choice.custom_active && choice.index + 1 < choice.options.len() {
                    choice.index += 1;
                    choice.sync_custom_override();
                    return;
                }
                if choice.custom_active && has_next {
                    // Vertical moves drop the override; tab keeps it
                    choice.custom_active = false;
                }
            }
        }
        self.focus_next();
    }

    /// Handles an up event, mirroring [`InputForm::move_down`].
    pub fn move_up(&mut self) {
        let has_previous = self.cursor > 0;
        if let Some(field) = self.fields.get_mut(self.cursor) {
            if let FieldKind::Choice(choice) = &mut field.kind {
                if !choice.custom_active && choice.index > 0 {
                    choice.index -= 1;
                    choice.sync_custom_override();
                    return;
                }
                if choice.custom_active && has_previous {
                    choice.custom_active = false;
                }
            }
        }
        self.focus_previous();
    }

    /// Routes a typed character to the single focused buffer, if any.
    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.cursor) {
            match &mut field.kind {
                FieldKind::Text(buffer) => buffer.insert(c),
                FieldKind::Choice(choice) => choice.custom.insert(c),
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.cursor) {
            match &mut field.kind {
                FieldKind::Text(buffer) => buffer.backspace(),
                FieldKind::Choice(choice) => choice.custom.backspace(),
            }
        }
    }
}

/// The confirmation dialog over a fully-resolved pending command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub node_name: String,
    pub command: String,
    /// Current yes/no selection; defaults to yes.
    pub yes: bool,
}

impl ConfirmDialog {
    #[must_use]
    pub fn new(node_name: String, command: String) -> Self {
        Self {
            node_name,
            command,
            yes: true,
        }
    }
}

/// The mutually exclusive modal states layered over navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    None,
    Help,
    Confirm(ConfirmDialog),
    Input(InputForm),
}

/// The whole session state, owned by the single-threaded event loop.
pub struct App {
    pub tree: CommandTree,
    /// Cursor into the flattened visible-row list, clamped to range.
    pub cursor: usize,
    pub modal: Modal,
}

impl App {
    #[must_use]
    pub fn new(tree: CommandTree) -> Self {
        Self {
            tree,
            cursor: 0,
            modal: Modal::None,
        }
    }

    #[must_use]
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        self.tree.root().visible_rows()
    }

    /// The node under the cursor, if the cursor still resolves.
    #[must_use]
    pub fn selected_node(&self) -> Option<&CommandNode> {
        let rows = self.visible_rows();
        let row = rows.get(self.cursor)?;
        self.tree.root().node_at(&row.path)
    }

    pub(crate) fn clamp_cursor(&mut self) {
        let row_count = self.visible_rows().len();
        if self.cursor >= row_count {
            self.cursor = row_count.saturating_sub(1);
        }
    }
}
