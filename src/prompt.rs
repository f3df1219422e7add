use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use std::io::{self, BufRead, IsTerminal, Write};

/// dialoguer refuses to run without a terminal, piped input gets plain line reads
fn interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Ask for a secret without echoing it.
pub fn secret(message: &str) -> Result<String> {
    if interactive() {
        Ok(Password::new()
            .with_prompt(message)
            .allow_empty_password(true)
            .interact()?)
    } else {
        read_line(message)
    }
}

/// Ask for a line of text; an empty answer is allowed.
pub fn text(message: &str) -> Result<String> {
    if interactive() {
        Ok(Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()?)
    } else {
        read_line(message)
    }
}

/// Show `message` and read one line from stdin, without the trailing newline.
///
/// End of input is treated as an empty answer.
fn read_line(message: &str) -> Result<String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    ask(message, &mut stdin.lock(), &mut stdout)
}

fn ask<R: BufRead, W: Write>(message: &str, input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "{}: ", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
