// Line-based interactive console

pub mod console;
pub mod editor;

pub use console::{Console, ScriptedConsole, StdConsole};
pub use editor::{EditorState, choose_profile, edit_settings};
