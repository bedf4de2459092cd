//! Before-input type table
//!
//! A closed mapping from `InputEvent.inputType` strings to what the handler
//! should do. Side effects (preventDefault, composition key, removability
//! checks) are applied by `handlers::on_before_input`; this table only
//! classifies.

use serde::Serialize;

use crate::commands::{Command, CommandName, FormatKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputCommand {
    /// insertText with the raw event as payload
    InsertTextFromEvent,
    InsertLineBreak,
    InsertParagraph,
    Paste,
    RemoveText,
    DeleteCharacter { backward: bool },
    DeleteWord { backward: bool },
    DeleteLine { backward: bool },
    Format(FormatKind),
    Undo,
    Redo,
}

impl InputCommand {
    /// Build the command. `event_command` wraps the raw event for the
    /// commands that carry it.
    pub fn command(&self, event_command: impl FnOnce(CommandName) -> Command) -> Command {
        match *self {
            InputCommand::InsertTextFromEvent => event_command(CommandName::InsertText),
            InputCommand::InsertLineBreak => Command::new(CommandName::InsertLineBreak),
            InputCommand::InsertParagraph => Command::new(CommandName::InsertParagraph),
            InputCommand::Paste => event_command(CommandName::Paste),
            InputCommand::RemoveText => Command::new(CommandName::RemoveText),
            InputCommand::DeleteCharacter { backward } => Command::delete_character(backward),
            InputCommand::DeleteWord { backward } => Command::delete_word(backward),
            InputCommand::DeleteLine { backward } => Command::delete_line(backward),
            InputCommand::Format(kind) => Command::format_text(kind),
            InputCommand::Undo => Command::new(CommandName::Undo),
            InputCommand::Redo => Command::new(CommandName::Redo),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum InputTypeAction {
    /// Composition edits are left to the platform.
    NativeComposition,
    /// Soft-keyboard backspace: clear composition, delete one character.
    SoftKeyboardDelete,
    /// Plain `insertText`, resolved against the event data.
    InsertText,
    #[serde(rename_all = "camelCase")]
    Dispatch {
        command: InputCommand,
        /// The input ends any composition in progress.
        ends_composition: bool,
    },
    /// `deleteByComposition`: remove only if the selection allows it.
    RemoveIfPermitted,
    Unrecognized,
}

fn dispatch(command: InputCommand) -> InputTypeAction {
    InputTypeAction::Dispatch {
        command,
        ends_composition: false,
    }
}

fn dispatch_ending_composition(command: InputCommand) -> InputTypeAction {
    InputTypeAction::Dispatch {
        command,
        ends_composition: true,
    }
}

pub fn classify_input_type(input_type: &str) -> InputTypeAction {
    match input_type {
        "deleteCompositionText" | "insertCompositionText" => InputTypeAction::NativeComposition,
        "deleteContentBackward" => InputTypeAction::SoftKeyboardDelete,
        "insertText" => InputTypeAction::InsertText,

        "insertFromYank" | "insertFromDrop" | "insertReplacementText" => {
            dispatch(InputCommand::InsertTextFromEvent)
        }
        "insertFromComposition" => dispatch_ending_composition(InputCommand::InsertTextFromEvent),
        "insertLineBreak" => dispatch_ending_composition(InputCommand::InsertLineBreak),
        "insertParagraph" => dispatch_ending_composition(InputCommand::InsertParagraph),
        "insertFromPaste" | "insertFromPasteAsQuotation" => dispatch(InputCommand::Paste),

        "deleteByComposition" => InputTypeAction::RemoveIfPermitted,
        "deleteByDrag" | "deleteByCut" => dispatch(InputCommand::RemoveText),
        "deleteContent" => dispatch(InputCommand::DeleteCharacter { backward: false }),
        "deleteWordBackward" => dispatch(InputCommand::DeleteWord { backward: true }),
        "deleteWordForward" => dispatch(InputCommand::DeleteWord { backward: false }),
        "deleteHardLineBackward" | "deleteSoftLineBackward" => {
            dispatch(InputCommand::DeleteLine { backward: true })
        }
        "deleteContentForward" | "deleteHardLineForward" | "deleteSoftLineForward" => {
            dispatch(InputCommand::DeleteLine { backward: false })
        }

        "formatStrikeThrough" => dispatch(InputCommand::Format(FormatKind::Strikethrough)),
        "formatBold" => dispatch(InputCommand::Format(FormatKind::Bold)),
        "formatItalic" => dispatch(InputCommand::Format(FormatKind::Italic)),
        "formatUnderline" => dispatch(InputCommand::Format(FormatKind::Underline)),

        "historyUndo" => dispatch(InputCommand::Undo),
        "historyRedo" => dispatch(InputCommand::Redo),

        _ => InputTypeAction::Unrecognized,
    }
}
