//! Translation tables from raw platform input to commands

pub mod input_type;
pub mod keyboard;

pub use input_type::{classify_input_type, InputCommand, InputTypeAction};
pub use keyboard::{is_possible_soft_key, translate_key, KeyAction, KeyBinding, KEY_BINDINGS};
