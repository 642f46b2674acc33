//! # console — line-oriented host for the dashboard
//!
//! Plays the role of the browser page: user actions come in as text lines,
//! the composed view goes out as text.
//!
//! ```text
//! lang en|id             switch language
//! set <field> <value>    edit the connect form (exchange / apiKey / secretKey)
//! submit                 send the connect request
//! show                   re-render the page
//! help                   list commands
//! quit                   leave
//! ```

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::dashboard::Dashboard;
use crate::error::CommandError;
use crate::i18n::Language;
use crate::view::render_text;

pub const HELP: &str = "\
Commands:
  lang en|id             switch language
  set <field> <value>    edit the connect form (exchange | apiKey | secretKey)
  submit                 connect exchange
  show                   re-render the page
  help                   this text
  quit                   leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lang(Language),
    Set { field: String, value: String },
    Submit,
    Show,
    Help,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match verb.to_ascii_lowercase().as_str() {
            "lang" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("language (en | id)"));
                }
                Ok(Command::Lang(Language::parse(rest)))
            }
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::MissingArgument("field"));
                }
                Ok(Command::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                })
            }
            "submit" => Ok(Command::Submit),
            "show" | "" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Drive `dashboard` from `input` until `quit` or end of input.  Startup
/// fetches are kicked off here.
pub async fn run<R, W>(dashboard: &mut Dashboard, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    dashboard.initialize();
    render(dashboard, &mut output).await?;
    output.write_all(HELP.as_bytes()).await?;
    output.flush().await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Console input closed");
                    break;
                };
                if let Flow::Quit = handle_line(dashboard, &line, &mut output).await? {
                    break;
                }
            }
            Some(event) = dashboard.next_event() => {
                dashboard.apply(event);
                render(dashboard, &mut output).await?;
            }
        }
    }

    info!("👋 Leaving dashboard");
    dashboard.teardown();
    Ok(())
}

async fn handle_line<W>(dashboard: &mut Dashboard, line: &str, output: &mut W) -> anyhow::Result<Flow>
where
    W: AsyncWrite + Unpin,
{
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(err) => {
            output.write_all(format!("⚠️  {err}\n{HELP}").as_bytes()).await?;
            output.flush().await?;
            return Ok(Flow::Continue);
        }
    };

    match command {
        Command::Lang(language) => {
            dashboard.set_language(language);
            render(dashboard, output).await?;
        }
        Command::Set { field, value } => {
            if let Err(err) = dashboard.update_field(&field, value) {
                output.write_all(format!("⚠️  {err}\n").as_bytes()).await?;
            }
        }
        Command::Submit => match dashboard.submit() {
            Ok(()) => render(dashboard, output).await?,
            Err(err) => output.write_all(format!("⚠️  {err}\n").as_bytes()).await?,
        },
        Command::Show => render(dashboard, output).await?,
        Command::Help => output.write_all(HELP.as_bytes()).await?,
        Command::Quit => return Ok(Flow::Quit),
    }

    output.flush().await?;
    Ok(Flow::Continue)
}

async fn render<W>(dashboard: &Dashboard, output: &mut W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let page = render_text(&dashboard.view());
    output.write_all(b"\n").await?;
    output.write_all(page.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
