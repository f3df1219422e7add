use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use super::OutputFormat;
use crate::invitations::{Outcome, Tally};
use crate::types::Invitation;

const RULE: &str = "=============================================================";

/// Print data in the specified format
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Table => {
            println!("{}", Table::new(data));
        }
        OutputFormat::Plain => {
            let json = serde_json::to_value(data)?;
            if let Some(arr) = json.as_array() {
                for item in arr {
                    if let Some(obj) = item.as_object() {
                        let values: Vec<String> = obj
                            .values()
                            .map(|v| match v {
                                serde_json::Value::String(s) => s.clone(),
                                serde_json::Value::Null => "".to_string(),
                                other => other.to_string(),
                            })
                            .collect();
                        println!("{}", values.join("|"));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Print the status line for one processed invitation
pub fn print_outcome(invitation: &Invitation, outcome: &Outcome) {
    if let Some(line) = outcome_line(invitation, outcome) {
        println!("{}", line);
    }
}

/// Status line for an outcome; other owners get none, they are only traced
fn outcome_line(invitation: &Invitation, outcome: &Outcome) -> Option<String> {
    let repo = invitation.repo_name();
    let line = match outcome {
        Outcome::Accepted => format!(
            "{} Invitation accepted for repository: {}",
            "[SUCCESS]".green(),
            repo
        ),
        Outcome::AlreadyAccepted => {
            format!("Invitation was already accepted for repository: {}", repo)
        }
        Outcome::Expired => format!(
            "{} Invitation has expired or removed: {}",
            "[FAILED]".red(),
            repo
        ),
        Outcome::Rejected(_) => format!(
            "{} Invitation for {} can't be processed at this time.",
            "[FAILED]".red(),
            repo
        ),
        Outcome::Unreachable(reason) => format!(
            "{} Invitation for {} can't be processed at this time. ({})",
            "[FAILED]".red(),
            repo,
            reason
        ),
        Outcome::WouldAccept => format!(
            "{} Would accept invitation for repository: {}",
            "[DRY RUN]".yellow(),
            repo
        ),
        Outcome::OtherOwner => return None,
    };
    Some(line)
}

/// Print the closing summary block
pub fn print_summary(tally: &Tally) {
    println!("{}", RULE);
    println!("Summary:");
    println!("Accepted invitations: {}", tally.success);
    println!("Skipped invitations: {}", tally.skipped);
    println!("Failed invitations: {}", tally.failed);
    println!("{}", RULE);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}
