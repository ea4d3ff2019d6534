//! UI state that is not part of the dice model.
//!
//! Tracks which text field (if any) is being edited, its buffer, the status
//! line and the popups.

/// Current input mode of the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands.
    Normal,
    /// Editing the threshold text.
    Threshold,
    /// Typing the name of a new macro.
    MacroName,
    /// Typing the roll expression of a new macro.
    MacroRoll,
    /// Typing the number of the macro to apply.
    ApplyMacro,
    /// Typing the number of the macro to delete.
    DeleteMacro,
}

impl InputMode {
    /// Returns `true` while a text field has the keyboard.
    pub fn is_typing(self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Returns `true` for fields that only take a macro number.
    pub fn is_macro_number(self) -> bool {
        matches!(self, Self::ApplyMacro | Self::DeleteMacro)
    }

    /// Prompt shown in front of the input buffer.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Threshold => "threshold",
            Self::MacroName => "macro name",
            Self::MacroRoll => "macro roll",
            Self::ApplyMacro => "apply macro #",
            Self::DeleteMacro => "delete macro #",
        }
    }
}

/// One-line feedback in the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    /// The message.
    pub text: String,
    /// Whether it reports a rejected input.
    pub is_error: bool,
}

/// Full UI state.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Current input mode.
    pub mode: InputMode,
    /// Text being typed in the active field.
    pub input: String,
    /// Name captured in [`InputMode::MacroName`], kept while the roll is typed.
    pub pending_macro_name: String,
    /// Status line content.
    pub status: Option<StatusMessage>,
    /// Modal error; the next key press dismisses it.
    pub error_popup: Option<String>,
    /// Whether the help popup is visible.
    pub show_help: bool,
}

impl UiState {
    /// Creates the initial state.
    pub fn new() -> Self {
        Self {
            mode: InputMode::Normal,
            input: String::new(),
            pending_macro_name: String::new(),
            status: None,
            error_popup: None,
            show_help: false,
        }
    }

    /// Switches to `mode` with the buffer preset to `initial`.
    pub fn begin_input(&mut self, mode: InputMode, initial: &str) {
        self.mode = mode;
        self.input = initial.to_string();
    }

    /// Returns to normal mode, handing back whatever was typed.
    pub fn finish_input(&mut self) -> String {
        self.mode = InputMode::Normal;
        std::mem::take(&mut self.input)
    }

    /// Sets an informational status message.
    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    /// Sets an error status message.
    pub fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
