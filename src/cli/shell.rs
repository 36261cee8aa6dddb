//! Interactive mode. Every line is parsed as one command and runs against
//! the same session, so remembered values and the interaction count carry
//! over from line to line.

use super::{AppCommand, execute};
use crate::session::Session;
use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

#[derive(Parser)]
#[command(name = "convkit", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: AppCommand,
}

pub async fn run_shell<R, W>(session: &mut Session, reader: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let language = session.translator().language().to_string();
    writeln!(
        out,
        "{}",
        session
            .translator()
            .t_with("shellWelcome", &[("lang", language.as_str())])
    )?;
    out.flush()?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.first().copied() {
            None => continue,
            Some("exit" | "quit") => break,
            Some("help") => {
                writeln!(out, "{}", ShellLine::command().render_help())?;
            }
            Some(_) => {
                match ShellLine::try_parse_from(std::iter::once("convkit").chain(words)) {
                    Ok(parsed) => {
                        debug!(command = ?parsed.command, "Shell command");
                        let output = execute(session, parsed.command).await?;
                        writeln!(out, "{output}")?;
                    }
                    Err(e) => writeln!(out, "{}", e.render())?,
                }
            }
        }
        out.flush()?;
    }
    Ok(())
}
