//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use booking_core::Error;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a note to stderr.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Report a failed command on stderr.
///
/// Validation failures are listed per field, and an expired session gets a
/// hint to log in again.
pub fn report(err: &anyhow::Error) {
    let api_error = err.chain().find_map(|cause| cause.downcast_ref::<Error>());

    match api_error {
        Some(Error::Validation(errors)) => {
            error("Invalid input");
            for field_error in errors.errors() {
                eprintln!("  {}: {}", field_error.field.yellow(), field_error.message);
            }
        }
        Some(api) if api.is_session_expired() => {
            error(&format!("{:#}", err));
            note("Your session has expired. Run 'booking auth login' to sign in again.");
        }
        _ => error(&format!("{:#}", err)),
    }
}
