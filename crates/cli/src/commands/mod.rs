//! Subcommand implementations.
//!
//! Each command drives a desk page the same way a screen would: flows
//! report through [`ConsoleNotifier`] and ask through [`Confirmation`].

use std::io::{BufRead, Write};

use thiserror::Error;

use clientele_core::{AddressDraft, AddressId, CustomerId, ValidationError};
use clientele_desk::{AppError, Confirm, Level, Notification, Notifier, Outcome};

pub mod addresses;
pub mod browse;
pub mod customers;

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Address not found: {0}")]
    AddressNotFound(AddressId),

    /// The flow already notified the user; only the exit status is left.
    #[error("Operation failed")]
    Failed,
}

/// Turn a failed flow into an error so the process exits non-zero.
fn check(outcome: Outcome) -> Result<Outcome, CommandError> {
    if outcome.is_failure() {
        return Err(CommandError::Failed);
    }
    Ok(outcome)
}

/// [`check`] for flows whose outcome needs no further inspection.
fn finish(outcome: Outcome) -> Result<(), CommandError> {
    check(outcome).map(|_| ())
}

/// Prints notifications to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(title = %notification.title, "{}", notification.message);
        let mark = match notification.level {
            Level::Success => "ok",
            Level::Error => "error",
        };
        let _ = writeln!(
            std::io::stderr(),
            "[{mark}] {}: {}",
            notification.title,
            notification.message
        );
    }
}

/// Confirmation prompt on the terminal, or `--yes`.
#[derive(Debug, Clone, Copy)]
pub struct Confirmation {
    assume_yes: bool,
}

impl Confirmation {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for Confirmation {
    fn confirm(&self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stderr = std::io::stderr().lock();
        if write!(stderr, "{title} {message} [y/N] ").is_err() || stderr.flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Address fields shared by `address add` and `address update`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddressFields {
    /// Label, e.g. "Home" or "Office"
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub street: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    /// Postal code
    #[arg(long)]
    pub zip: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    /// Make this the primary address
    #[arg(long)]
    pub primary: bool,
}

impl AddressFields {
    /// Overlay the given fields on `draft`.
    pub fn apply(self, mut draft: AddressDraft) -> AddressDraft {
        let overlay = [
            (self.name, &mut draft.name),
            (self.street, &mut draft.street),
            (self.city, &mut draft.city),
            (self.state, &mut draft.state),
            (self.zip, &mut draft.zip_code),
            (self.country, &mut draft.country),
        ];
        for (value, slot) in overlay {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if self.primary {
            draft.is_primary = true;
        }
        draft
    }
}
