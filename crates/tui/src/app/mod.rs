//! The interactive application: session state, the modal state machine and
//! frame rendering.

mod state;
mod update;
mod view;

pub use state::{
    Action, App, ChoiceState, ConfirmDialog, FieldKind, InputField, InputForm, Modal, TextBuffer,
    CUSTOM_OPTION_VALUE,
};
pub use view::draw;
