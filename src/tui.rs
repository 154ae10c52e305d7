//! Inline raw-mode shell view.
//!
//! The log is append-only, so the view prints entries as they arrive instead
//! of repainting a screen: one prompt line is owned and redrawn in place, and
//! everything above it scrolls naturally. `/clear` is the one shrinking
//! operation; it triggers a full screen wipe.

use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, execute, queue};

use crate::app::{EntryKind, ShellApp, TerminalEntry};
use crate::runtime::{ExecEvent, ShellController};

const POLL_INTERVAL: Duration = Duration::from_millis(16);
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn ansi_wrap(text: &str, prefix: &str, suffix: &str) -> String {
    format!("{prefix}{text}{suffix}")
}

fn dim(text: &str) -> String {
    ansi_wrap(text, "\x1b[2m", "\x1b[22m")
}

fn bold(text: &str) -> String {
    ansi_wrap(text, "\x1b[1m", "\x1b[22m")
}

fn green(text: &str) -> String {
    ansi_wrap(text, "\x1b[32m", "\x1b[39m")
}

fn cyan(text: &str) -> String {
    ansi_wrap(text, "\x1b[36m", "\x1b[39m")
}

fn red(text: &str) -> String {
    ansi_wrap(text, "\x1b[31m", "\x1b[39m")
}

/// How the shell loop ended; decides whether the caller tears the session
/// down or leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    Logout,
    Quit,
}

/// Key input reduced to the actions the shell loop understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellKey {
    Submit,
    HistoryPrevious,
    HistoryNext,
    Backspace,
    Char(char),
    Interrupt,
    Ignored,
}

fn map_key_event(key_event: KeyEvent) -> ShellKey {
    if key_event.kind != KeyEventKind::Press {
        return ShellKey::Ignored;
    }

    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return ShellKey::Interrupt;
    }

    match key_event.code {
        KeyCode::Enter => ShellKey::Submit,
        KeyCode::Up => ShellKey::HistoryPrevious,
        KeyCode::Down => ShellKey::HistoryNext,
        KeyCode::Backspace => ShellKey::Backspace,
        KeyCode::Char(ch) if key_event.modifiers.is_empty()
            || key_event.modifiers == KeyModifiers::SHIFT =>
        {
            ShellKey::Char(ch)
        }
        _ => ShellKey::Ignored,
    }
}

/// Renders one log entry as styled lines, terminal-newline free.
fn format_entry(entry: &TerminalEntry) -> Vec<String> {
    let lines = |text: &str, style: fn(&str) -> String| -> Vec<String> {
        text.trim_end_matches('\n')
            .split('\n')
            .map(style)
            .collect()
    };

    match entry.kind {
        EntryKind::Welcome => lines(&entry.content, dim),
        EntryKind::Input => vec![format!("{} {}", green("$"), bold(&entry.content))],
        EntryKind::Output => {
            let mut out = lines(&entry.content, |text| text.to_string());
            if let Some(code) = entry.exit_code.filter(|code| *code != 0) {
                out.push(dim(&format!("(exit {code})")));
            }
            out
        }
        EntryKind::Error => lines(&entry.content, red),
        EntryKind::System => lines(&entry.content, cyan),
    }
}

fn prompt_line(app: &ShellApp, spinner_index: usize) -> String {
    if app.is_submitting() {
        let frame = SPINNER_FRAMES[spinner_index % SPINNER_FRAMES.len()];
        format!("{} {}", cyan(frame), dim("running…"))
    } else {
        format!("{} {}", green("$"), app.input)
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Tracks what has already been printed so each tick only writes the delta.
struct InlineView {
    printed_entries: usize,
    last_prompt: String,
}

impl InlineView {
    fn new() -> Self {
        Self {
            printed_entries: 0,
            last_prompt: String::new(),
        }
    }

    fn draw(
        &mut self,
        out: &mut impl Write,
        app: &ShellApp,
        spinner_index: usize,
    ) -> io::Result<()> {
        // The log shrank, which only /clear does: wipe and restart the tally.
        if app.log.len() < self.printed_entries {
            queue!(
                out,
                Clear(ClearType::All),
                Clear(ClearType::Purge),
                cursor::MoveTo(0, 0)
            )?;
            self.printed_entries = 0;
            self.last_prompt.clear();
        }

        let prompt = prompt_line(app, spinner_index);
        let new_entries = &app.log[self.printed_entries..];
        if new_entries.is_empty() && prompt == self.last_prompt {
            return Ok(());
        }

        queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        for entry in new_entries {
            for line in format_entry(entry) {
                out.write_all(line.as_bytes())?;
                out.write_all(b"\r\n")?;
            }
        }
        self.printed_entries = app.log.len();

        out.write_all(prompt.as_bytes())?;
        self.last_prompt = prompt;
        out.flush()
    }
}

/// Runs the interactive shell until the app asks to exit.
///
/// Completion events are drained before input each tick, so a response and
/// the keystroke that follows it can never apply out of order.
pub fn run_shell_loop(
    app: &mut ShellApp,
    controller: &Arc<ShellController>,
    events: &Receiver<ExecEvent>,
) -> io::Result<LoopOutcome> {
    let _raw_mode = RawModeGuard::enable()?;
    let mut out = io::stdout();
    let mut host = Arc::clone(controller);
    let mut view = InlineView::new();
    let mut spinner_index = 0usize;
    let mut spinner_tick = Instant::now();

    view.draw(&mut out, app, spinner_index)?;

    while !app.should_exit && !controller.stop_requested() {
        controller.drain_events(app, events);

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key_event) = event::read()? {
                apply_key(app, &mut host, map_key_event(key_event));
            }
        }

        if app.is_submitting() && spinner_tick.elapsed() >= SPINNER_INTERVAL {
            spinner_index = spinner_index.wrapping_add(1);
            spinner_tick = Instant::now();
        }

        controller.take_render_request();
        view.draw(&mut out, app, spinner_index)?;
    }

    // Land the cursor below the prompt line before raw mode drops.
    execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;

    Ok(if app.logout_requested {
        LoopOutcome::Logout
    } else {
        LoopOutcome::Quit
    })
}

fn apply_key(app: &mut ShellApp, host: &mut Arc<ShellController>, key: ShellKey) {
    // While a command is in flight only the interrupt key is live.
    if app.is_submitting() {
        if key == ShellKey::Interrupt {
            app.on_control_c(host);
        }
        return;
    }

    match key {
        ShellKey::Submit => app.on_submit(host),
        ShellKey::HistoryPrevious => app.on_history_previous(),
        ShellKey::HistoryNext => app.on_history_next(),
        ShellKey::Backspace => app.on_input_backspace(),
        ShellKey::Char(ch) => app.on_input_char(ch),
        ShellKey::Interrupt => app.on_control_c(host),
        ShellKey::Ignored => {}
    }
}
