//! Interactive parameter editor.
//!
//! A synchronous state machine over a [`Console`]: the top menu lists every
//! parameter of the profile, picking one enters the sub-flow for its kind, and
//! empty input at the top menu ends the session. Bad input never escapes a
//! sub-flow; it is reported and the same prompt is shown again.

use std::io;
use tracing::debug;

use super::console::Console;
use crate::engine::core::{ResolutionFix, SettingValue, Settings};
use crate::engine::params::{
    ChoiceDef, CodecProfile, Handler, ParamDef, ParamKind, RESET_TOKENS, Range, Registry,
    SCALE_FIX_KEY, SCALE_KEY, ValidationError, parse_choice, parse_dimension, parse_resolution,
    validate_input,
};

const PROMPT: &str = "> ";
const INVALID_CHOICE: &str = "Invalid choice, try again.";
const NOT_SET: &str = "not set";
const RESET_HINT: &str = "Enter 'r' or 'reset' to leave this parameter unchanged.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    TopMenu,
    /// Editing the parameter at this index of the profile
    EditParam(usize),
    FixResolution,
    Done,
}

fn is_reset_token(input: &str) -> bool {
    RESET_TOKENS
        .iter()
        .any(|t| t.eq_ignore_ascii_case(input.trim()))
}

fn display_value(value: Option<&SettingValue>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_SET.to_string())
}

struct Editor<'a, C: Console + ?Sized> {
    profile: &'a CodecProfile,
    settings: &'a mut Settings,
    console: &'a mut C,
    /// Shown under the next top-menu redraw
    notice: Option<String>,
}

impl<C: Console + ?Sized> Editor<'_, C> {
    fn run(&mut self) -> io::Result<()> {
        let mut state = EditorState::TopMenu;
        while state != EditorState::Done {
            state = match state {
                EditorState::TopMenu => self.top_menu()?,
                EditorState::EditParam(index) => {
                    let params = self.profile.params;
                    let param = &params[index];
                    match param.kind {
                        ParamKind::DirectInput { range } => self.edit_direct(param, range)?,
                        ParamKind::Choice { choices } => self.edit_choice(param, choices)?,
                        ParamKind::Handled(Handler::Scale) => self.edit_scale()?,
                    }
                    EditorState::TopMenu
                }
                EditorState::FixResolution => {
                    self.edit_fix()?;
                    EditorState::TopMenu
                }
                EditorState::Done => EditorState::Done,
            };
        }
        Ok(())
    }

    fn top_menu(&mut self) -> io::Result<EditorState> {
        let params = self.profile.params;

        self.console.clear()?;
        self.console.print(&format!("Codec: {}", self.profile))?;
        self.console.print("Select option:")?;
        for (i, param) in params.iter().enumerate() {
            self.console.print(&format!(
                "{}. {} (Now: {})",
                i + 1,
                param.label,
                display_value(self.settings.get(param.key))
            ))?;
        }
        let entries = if self.profile.requires_even_dimensions {
            self.console.print(&format!(
                "{}. Fix resolution (Now: {})",
                params.len() + 1,
                display_value(self.settings.get(SCALE_FIX_KEY))
            ))?;
            params.len() + 1
        } else {
            params.len()
        };
        self.console.print("Enter empty input to finish selection")?;
        if let Some(notice) = self.notice.take() {
            self.console.print(&notice)?;
        }

        let input = match self.console.read_line(PROMPT)? {
            None => return Ok(EditorState::Done),
            Some(line) if line.trim().is_empty() => return Ok(EditorState::Done),
            Some(line) => line,
        };

        match parse_choice(&input, entries) {
            Ok(index) if index < params.len() => Ok(EditorState::EditParam(index)),
            Ok(_) => Ok(EditorState::FixResolution),
            Err(e) => {
                self.notice = Some(e.to_string());
                Ok(EditorState::TopMenu)
            }
        }
    }

    fn store(&mut self, key: &str, value: SettingValue) {
        debug!("Setting '{}' = {}", key, value);
        self.settings.set(key, value);
    }

    fn edit_direct(&mut self, param: &ParamDef, range: Range) -> io::Result<()> {
        self.console.clear()?;
        self.console.print(param.help)?;
        if !matches!(range, Range::Any) {
            self.console.print(&format!("Allowed: {}", range))?;
        }
        if param.resettable {
            self.console.print(RESET_HINT)?;
        }

        loop {
            let input = match self.console.read_line(PROMPT)? {
                Some(line) if !line.trim().is_empty() => line,
                _ => return Ok(()),
            };

            if param.resettable && is_reset_token(&input) {
                self.settings.reset(param.key);
                return Ok(());
            }

            match validate_input(&range, &input) {
                Ok(()) => {
                    self.store(param.key, SettingValue::from_input(&input));
                    return Ok(());
                }
                Err(e) => self.console.print(&e.to_string())?,
            }
        }
    }

    fn edit_choice(&mut self, param: &ParamDef, choices: &[ChoiceDef]) -> io::Result<()> {
        self.console.clear()?;
        self.console.print(param.help)?;

        loop {
            for (i, choice) in choices.iter().enumerate() {
                self.console
                    .print(&format!("{}. {}", i + 1, choice.label))?;
            }
            if param.resettable {
                self.console.print("r. Don't change")?;
            }

            let input = match self.console.read_line(PROMPT)? {
                Some(line) if !line.trim().is_empty() => line,
                _ => return Ok(()),
            };

            if param.resettable && is_reset_token(&input) {
                self.settings.reset(param.key);
                return Ok(());
            }

            match parse_choice(&input, choices.len()) {
                Ok(index) => {
                    self.store(param.key, SettingValue::text(choices[index].value));
                    return Ok(());
                }
                Err(_) => self.console.print(INVALID_CHOICE)?,
            }
        }
    }

    /// Ask until `parse` accepts the input; `None` when the user backs out
    fn read_until_valid<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> io::Result<Option<T>> {
        loop {
            let input = match self.console.read_line(prompt)? {
                Some(line) if !line.trim().is_empty() => line,
                _ => return Ok(None),
            };
            match parse(&input) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.console.print(&e.to_string())?,
            }
        }
    }

    fn edit_scale(&mut self) -> io::Result<()> {
        self.console.clear()?;

        loop {
            self.console.print("Scale options (empty to go back):")?;
            self.console.print("1. Height")?;
            self.console.print("2. Width")?;
            self.console.print("3. Resolution (W:H)")?;
            self.console.print("4. Reset to original")?;

            let input = match self.console.read_line(PROMPT)? {
                Some(line) if !line.trim().is_empty() => line,
                _ => return Ok(()),
            };

            let value = match input.trim() {
                "1" => self
                    .read_until_valid(
                        "Enter height value (Width adjusts automatically): ",
                        parse_dimension,
                    )?
                    .map(|h| format!("-1:{}", h)),
                "2" => self
                    .read_until_valid(
                        "Enter width value (Height adjusts automatically): ",
                        parse_dimension,
                    )?
                    .map(|w| format!("{}:-1", w)),
                "3" => self
                    .read_until_valid("Enter resolution (W:H): ", parse_resolution)?
                    .map(|(w, h)| format!("{}:{}", w, h)),
                "4" => {
                    self.settings.clear(SCALE_KEY);
                    return Ok(());
                }
                other if is_reset_token(other) => {
                    self.settings.clear(SCALE_KEY);
                    return Ok(());
                }
                _ => {
                    self.console.print(INVALID_CHOICE)?;
                    continue;
                }
            };

            if let Some(value) = value {
                self.store(SCALE_KEY, SettingValue::Text(value));
                return Ok(());
            }
        }
    }

    fn edit_fix(&mut self) -> io::Result<()> {
        self.console.clear()?;

        loop {
            self.console.print("Fix resolution options:")?;
            self.console.print("1. Add 1px padding (pad)")?;
            self.console.print("2. Crop 1px (crop)")?;
            self.console.print("3. Cancel")?;

            let input = match self.console.read_line(PROMPT)? {
                Some(line) if !line.trim().is_empty() => line,
                _ => return Ok(()),
            };

            match input.trim() {
                "1" => self.store(SCALE_FIX_KEY, SettingValue::text(ResolutionFix::Pad.value())),
                "2" => self.store(SCALE_FIX_KEY, SettingValue::text(ResolutionFix::Crop.value())),
                "3" => {
                    self.settings.clear(SCALE_FIX_KEY);
                }
                _ => {
                    self.console.print(INVALID_CHOICE)?;
                    continue;
                }
            }
            return Ok(());
        }
    }
}

/// Run the interactive editor until the user submits an empty line at the
/// top menu (or input ends). Only console I/O errors are returned.
pub fn edit_settings<C: Console + ?Sized>(
    profile: &CodecProfile,
    settings: &mut Settings,
    console: &mut C,
) -> io::Result<()> {
    Editor {
        profile,
        settings,
        console,
        notice: None,
    }
    .run()
}

/// Numbered profile chooser. Reprompts until a valid entry; `None` at end of input.
pub fn choose_profile<'r, C: Console + ?Sized>(
    registry: &'r Registry,
    console: &mut C,
) -> io::Result<Option<&'r CodecProfile>> {
    let profiles = registry.profiles();

    console.print("Select codec:")?;
    for (i, profile) in profiles.iter().enumerate() {
        console.print(&format!("{}. {}", i + 1, profile.name))?;
    }

    loop {
        let Some(input) = console.read_line(PROMPT)? else {
            return Ok(None);
        };
        match parse_choice(&input, profiles.len()) {
            Ok(index) => return Ok(Some(&profiles[index])),
            Err(_) => console.print(INVALID_CHOICE)?,
        }
    }
}
