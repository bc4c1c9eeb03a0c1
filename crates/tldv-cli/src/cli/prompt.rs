//! Line-based terminal prompts.

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

/// Prints `msg` and reads one trimmed line; `None` at end of input.
pub(crate) fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    msg: &str,
) -> Result<Option<String>> {
    write!(out, "{msg}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line).context("read from terminal")? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Like [`read_answer`] but end of input is an error.
pub(crate) fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, msg: &str) -> Result<String> {
    match read_answer(input, out, msg)? {
        Some(answer) => Ok(answer),
        None => bail!("unexpected end of input"),
    }
}

/// y/Y confirms; anything else declines.
pub(crate) fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, msg: &str) -> Result<bool> {
    Ok(ask(input, out, msg)?.eq_ignore_ascii_case("y"))
}

/// Uses `token` when given, otherwise asks on the terminal.
pub(crate) async fn token_or_prompt(token: Option<String>) -> Result<String> {
    if let Some(t) = token.filter(|t| !t.trim().is_empty()) {
        return Ok(t);
    }
    let answer = tokio::task::spawn_blocking(|| {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();
        writeln!(out, "Need help getting the auth token? Run `tldv-dl token-help`.")?;
        ask(&mut input, &mut out, "Enter your Authorization token: ")
    })
    .await
    .context("token prompt task join")??;
    if answer.is_empty() {
        bail!("authorization token is required");
    }
    Ok(answer)
}
