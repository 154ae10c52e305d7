use crate::commands::{parse_slash_command, SlashCommand};

pub type SubmissionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Submitting { submission_id: SubmissionId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Welcome,
    Input,
    Output,
    Error,
    System,
}

/// One line of the terminal log. `exit_code` is only populated for
/// `Output` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalEntry {
    pub kind: EntryKind,
    pub content: String,
    pub exit_code: Option<i32>,
}

impl TerminalEntry {
    pub fn welcome(content: impl Into<String>) -> Self {
        Self::plain(EntryKind::Welcome, content)
    }

    pub fn input(content: impl Into<String>) -> Self {
        Self::plain(EntryKind::Input, content)
    }

    pub fn output(content: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            kind: EntryKind::Output,
            content: content.into(),
            exit_code,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::plain(EntryKind::Error, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(EntryKind::System, content)
    }

    fn plain(kind: EntryKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            exit_code: None,
        }
    }
}

/// Submitted commands, oldest first, with the recall cursor as an offset
/// from the most recent entry. `None` means not navigating.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CommandHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl CommandHistory {
    fn entries(&self) -> &[String] {
        &self.entries
    }

    fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    fn record_entry(&mut self, text: String) {
        self.entries.push(text);
        self.cursor = None;
    }

    fn previous(&mut self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        let cursor = match self.cursor {
            None => 0,
            Some(index) => (index + 1).min(self.entries.len() - 1),
        };

        self.cursor = Some(cursor);
        Some(self.entries[self.entries.len() - 1 - cursor].clone())
    }

    fn next(&mut self) -> Option<String> {
        let current = self.cursor?;

        if current == 0 {
            self.cursor = None;
            return Some(String::new());
        }

        let cursor = current - 1;
        self.cursor = Some(cursor);
        Some(self.entries[self.entries.len() - 1 - cursor].clone())
    }
}

pub trait HostOps {
    fn begin_execute(&mut self, command: String) -> Result<SubmissionId, String>;
    fn fetch_status(&mut self) -> Result<String, String>;
    fn request_render(&mut self);
    fn request_stop(&mut self);
}

const HELP_TEXT: &str = "Commands: /help, /clear, /status, /logout, /quit";

pub const WELCOME_LINES: [&str; 3] = [
    "Welcome to TempShell.",
    "Your commands run in an isolated Kubernetes environment.",
    "Type \"help\" to get started.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellApp {
    pub mode: Mode,
    pub input: String,
    pub log: Vec<TerminalEntry>,
    history: CommandHistory,
    pub should_exit: bool,
    pub logout_requested: bool,
}

impl Default for ShellApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellApp {
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            input: String::new(),
            log: WELCOME_LINES
                .iter()
                .copied()
                .map(TerminalEntry::welcome)
                .collect(),
            history: CommandHistory::default(),
            should_exit: false,
            logout_requested: false,
        }
    }

    /// Returns submitted command history in chronological order.
    pub fn history_entries(&self) -> &[String] {
        self.history.entries()
    }

    /// Returns the active history recall cursor, if navigating.
    pub fn history_cursor(&self) -> Option<usize> {
        self.history.cursor()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.mode, Mode::Submitting { .. })
    }

    /// Appends a system entry to the log without touching control state.
    pub fn push_system(&mut self, content: impl Into<String>) {
        self.log.push(TerminalEntry::system(content));
    }

    pub fn on_input_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn on_input_backspace(&mut self) {
        self.input.pop();
    }

    pub fn on_input_replace(&mut self, text: String) {
        self.input = text;
    }

    /// Recalls the next-older submitted command into the input field.
    pub fn on_history_previous(&mut self) {
        if self.is_submitting() {
            return;
        }

        if let Some(previous) = self.history.previous() {
            self.input = previous;
        }
    }

    /// Walks recall back toward the newest command; leaving recall clears
    /// the input field.
    pub fn on_history_next(&mut self) {
        if self.is_submitting() {
            return;
        }

        if let Some(next) = self.history.next() {
            self.input = next;
        }
    }

    pub fn on_submit(&mut self, host: &mut dyn HostOps) {
        let command = self.input.trim().to_string();

        if command.is_empty() {
            return;
        }

        if self.is_submitting() {
            return;
        }

        if let Some(local) = parse_slash_command(&command) {
            self.input.clear();
            self.run_local_command(local, host);
            return;
        }

        self.history.record_entry(command.clone());
        self.remove_welcome_entries();
        self.log.push(TerminalEntry::input(command.clone()));

        match host.begin_execute(command) {
            Ok(submission_id) => {
                self.mode = Mode::Submitting { submission_id };
            }
            Err(message) => {
                self.log.push(TerminalEntry::error(message));
            }
        }

        host.request_render();
    }

    pub fn on_execute_output(
        &mut self,
        submission_id: SubmissionId,
        output: String,
        exit_code: Option<i32>,
    ) {
        if !self.is_active_submission(submission_id) {
            return;
        }

        self.log.push(TerminalEntry::output(output, exit_code));
        self.finish_submission();
    }

    pub fn on_execute_failed(&mut self, submission_id: SubmissionId, message: String) {
        if !self.is_active_submission(submission_id) {
            return;
        }

        self.log.push(TerminalEntry::error(message));
        self.finish_submission();
    }

    pub fn on_control_c(&mut self, host: &mut dyn HostOps) {
        if !self.input.is_empty() {
            self.input.clear();
            host.request_render();
            return;
        }

        self.on_quit(host);
    }

    pub fn on_quit(&mut self, host: &mut dyn HostOps) {
        self.should_exit = true;
        host.request_stop();
        host.request_render();
    }

    fn run_local_command(&mut self, command: SlashCommand, host: &mut dyn HostOps) {
        match command {
            SlashCommand::Help => {
                self.push_system(HELP_TEXT);
            }
            SlashCommand::Clear => {
                self.log.clear();
            }
            SlashCommand::Status => match host.fetch_status() {
                Ok(summary) => self.push_system(summary),
                Err(message) => self.push_system(format!("Status check failed: {message}")),
            },
            SlashCommand::Logout => {
                self.logout_requested = true;
                self.should_exit = true;
                host.request_stop();
            }
            SlashCommand::Quit => {
                self.should_exit = true;
                host.request_stop();
            }
        }

        host.request_render();
    }

    fn is_active_submission(&self, submission_id: SubmissionId) -> bool {
        matches!(self.mode, Mode::Submitting { submission_id: active } if active == submission_id)
    }

    fn finish_submission(&mut self) {
        self.mode = Mode::Idle;
        self.input.clear();
    }

    fn remove_welcome_entries(&mut self) {
        self.log.retain(|entry| entry.kind != EntryKind::Welcome);
    }
}
