//! Interactive credential capture
//!
//! [`Prompter`] is the seam between credential resolution and the terminal,
//! so resolution can be exercised without a tty. [`TerminalPrompter`] is the
//! real implementation: the username is read as an echoed line from stdin,
//! the password is read with the terminal in raw mode so nothing is echoed.

use std::io::{self, BufRead, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use secrecy::SecretString;

use crate::error::{GilbertError, Result};

/// Source of interactively collected basic-auth credentials
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Ask for a username (echoed)
    fn prompt_username(&self) -> Result<String>;

    /// Ask for a password (not echoed)
    fn prompt_password(&self) -> Result<SecretString>;
}

/// Prompter backed by the controlling terminal
///
/// Prompts go to stderr so stdout stays clean for the gist URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn prompt_username(&self) -> Result<String> {
        eprintln!("Please login");
        eprint!("Username: ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        let username = input.trim().to_string();

        if username.is_empty() {
            return Err(GilbertError::InvalidInput("No username provided".to_string()));
        }
        Ok(username)
    }

    fn prompt_password(&self) -> Result<SecretString> {
        read_hidden("Password: ")
    }
}

/// Restores cooked mode when dropped, whatever path leaves the prompt
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode()
            .map_err(|e| GilbertError::AuthInput(format!("cannot disable terminal echo ({})", e)))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Read a line from the terminal without echoing it
///
/// Fails with `AuthInput` if echo cannot be switched off and with
/// `Cancelled` on Ctrl-C or Esc.
pub fn read_hidden(prompt: &str) -> Result<SecretString> {
    framed(&mut io::stderr(), prompt, || {
        RawModeGuard::enable().and_then(|_guard| read_hidden_line())
    })
}

/// Write `prompt`, run `read`, then end the line whatever `read` returned
fn framed<W: Write>(
    out: &mut W,
    prompt: &str,
    read: impl FnOnce() -> Result<SecretString>,
) -> Result<SecretString> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let result = read();

    // Raw mode swallowed the newline
    writeln!(out)?;
    result
}

fn read_hidden_line() -> Result<SecretString> {
    let mut buffer = String::new();

    loop {
        let evt = event::read().map_err(|e| GilbertError::AuthInput(e.to_string()))?;
        let Event::Key(key) = evt else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => break,
            KeyCode::Esc => return Err(GilbertError::Cancelled),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(GilbertError::Cancelled);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
    }

    Ok(SecretString::from(buffer))
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_framed_ends_line_after_input() {
        let mut out = Vec::new();
        let secret = framed(&mut out, "Password: ", || Ok(SecretString::from("hunter2"))).unwrap();

        assert_eq!(secret.expose_secret(), "hunter2");
        assert_eq!(String::from_utf8(out).unwrap(), "Password: \n");
    }

    #[test]
    fn test_framed_ends_line_when_echo_cannot_be_disabled() {
        let mut out = Vec::new();
        let err = framed(&mut out, "Password: ", || {
            Err(GilbertError::AuthInput("cannot disable terminal echo".into()))
        })
        .unwrap_err();

        assert!(matches!(err, GilbertError::AuthInput(_)));
        assert_eq!(String::from_utf8(out).unwrap(), "Password: \n");
    }
}
