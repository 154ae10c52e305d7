//! Interactive sign-in and sign-up prompt.
//!
//! Runs before the shell loop and again after `/logout`. Signup never grants
//! a session; a created account is sent back through the login step.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::session::SessionManager;

/// Whether the prompt produced a session or the user backed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    SignedIn,
    Aborted,
}

/// Drives login/signup against the session manager until a session exists
/// or the user gives up.
pub fn run_auth_prompt(session: &mut SessionManager) -> io::Result<AuthOutcome> {
    let mut out = io::stdout();
    writeln!(out, "TempShell — sign in to continue")?;

    loop {
        let Some(choice) = read_line("login, signup, or quit [l/s/q]: ", false)? else {
            return Ok(AuthOutcome::Aborted);
        };

        match choice.trim() {
            "l" | "login" => {
                if login_step(session)? {
                    return Ok(AuthOutcome::SignedIn);
                }
            }
            "s" | "signup" => signup_step(session)?,
            "q" | "quit" => return Ok(AuthOutcome::Aborted),
            "" => {}
            other => println!("Unrecognized choice: {other}"),
        }
    }
}

/// One login attempt. `false` means the backend rejected it or the user
/// backed out; the caller re-offers the menu.
fn login_step(session: &mut SessionManager) -> io::Result<bool> {
    let Some(username) = read_required("username: ", false)? else {
        return Ok(false);
    };
    let Some(password) = read_required("password: ", true)? else {
        return Ok(false);
    };

    match session.login(&username, &password) {
        Ok(established) => {
            println!("Logged in as {}.", established.username);
            Ok(true)
        }
        Err(error) => {
            println!("{error}");
            Ok(false)
        }
    }
}

fn signup_step(session: &mut SessionManager) -> io::Result<()> {
    let Some(username) = read_required("username: ", false)? else {
        return Ok(());
    };
    let Some(email) = read_required("email: ", false)? else {
        return Ok(());
    };
    let Some(password) = read_required("password: ", true)? else {
        return Ok(());
    };

    match session.signup(&username, &password, &email) {
        Ok(()) => println!("Account created. Please log in."),
        Err(error) => println!("{error}"),
    }

    Ok(())
}

/// Re-prompts until the answer is nonblank. `None` means the user backed
/// out with Esc or Ctrl-C.
fn read_required(prompt: &str, mask: bool) -> io::Result<Option<String>> {
    loop {
        match read_line(prompt, mask)? {
            None => return Ok(None),
            Some(answer) => {
                let answer = answer.trim().to_string();
                if !answer.is_empty() {
                    return Ok(Some(answer));
                }
            }
        }
    }
}

/// Reads one line in raw mode so password input can echo `*` per keystroke.
fn read_line(prompt: &str, mask: bool) -> io::Result<Option<String>> {
    let mut out = io::stdout();
    out.write_all(prompt.as_bytes())?;
    out.flush()?;

    terminal::enable_raw_mode()?;
    let result = read_line_raw(&mut out, mask);
    terminal::disable_raw_mode()?;

    out.write_all(b"\n")?;
    out.flush()?;
    result
}

fn read_line_raw(out: &mut impl Write, mask: bool) -> io::Result<Option<String>> {
    let mut line = String::new();

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Ok(None);
        }

        match key_event.code {
            KeyCode::Enter => return Ok(Some(line)),
            KeyCode::Esc => return Ok(None),
            KeyCode::Backspace => {
                if line.pop().is_some() {
                    out.write_all(b"\x08 \x08")?;
                    out.flush()?;
                }
            }
            KeyCode::Char(ch) => {
                line.push(ch);
                if mask {
                    out.write_all(b"*")?;
                } else {
                    let mut buf = [0u8; 4];
                    out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
                }
                out.flush()?;
            }
            _ => {}
        }
    }
}
