//! Line-oriented chat loop.

use std::io::Write;

use anyhow::Result;
use chrono::Local;
use cozy_core::{ConversationManager, ConversationView, Message, Notice, Sender};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub const TYPING_INDICATOR: &str = "Cozy is typing...";

const PROMPT: &str = "> ";

const HELP: &str = "Commands: /new start a new conversation, /quit leave, /help show this";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Send(String),
    New,
    Quit,
    Help,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/new" | "/reset" => ReplCommand::New,
            "/quit" | "/exit" => ReplCommand::Quit,
            "/help" | "/?" => ReplCommand::Help,
            text => ReplCommand::Send(text.to_string()),
        }
    }
}

/// Prints transcript entries that have not been shown yet.
#[derive(Debug, Default)]
pub struct Renderer {
    printed: usize,
}

impl Renderer {
    /// Print everything again from the top on the next render.
    pub fn restart(&mut self) {
        self.printed = 0;
    }

    pub fn render(&mut self, view: &ConversationView, out: &mut impl Write) -> std::io::Result<()> {
        for message in view.messages.iter().skip(self.printed) {
            writeln!(out, "{}", format_message(message))?;
        }
        self.printed = view.messages.len();
        Ok(())
    }
}

pub fn format_message(message: &Message) -> String {
    let who = match message.sender {
        Sender::User => "You",
        Sender::Agent => "Cozy",
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    format!("[{time}] {who}: {}", message.content)
}

fn print_notices(notices: &[Notice], out: &mut impl Write) -> std::io::Result<()> {
    for notice in notices {
        writeln!(out, "{notice}")?;
    }
    Ok(())
}

/// Drive `manager` from `input` until `/quit` or end of input.
pub async fn run_chat<R, W>(manager: &ConversationManager, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut renderer = Renderer::default();

    renderer.render(&manager.view(), out)?;
    print_notices(&manager.drain_notices().await, out)?;
    write!(out, "{PROMPT}")?;
    out.flush()?;

    while let Some(line) = lines.next_line().await? {
        match ReplCommand::parse(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Help => writeln!(out, "{HELP}")?,
            ReplCommand::New => {
                manager.reset().await;
                renderer.restart();
            }
            ReplCommand::Send(text) => send(manager, &text, &mut renderer, out).await?,
        }

        renderer.render(&manager.view(), out)?;
        print_notices(&manager.drain_notices().await, out)?;
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

/// Send one message. The optimistic user message is printed as soon as it is
/// published, followed by the typing indicator while the reply is pending.
async fn send<W: Write>(
    manager: &ConversationManager,
    text: &str,
    renderer: &mut Renderer,
    out: &mut W,
) -> Result<()> {
    let mut view_rx = manager.subscribe();
    let pending = manager.send(text);
    tokio::pin!(pending);

    let outcome = tokio::select! {
        outcome = &mut pending => outcome,
        loading = view_rx.wait_for(|view| view.loading) => {
            // Release the watch guard before the manager publishes again.
            let view = loading.ok().map(|view| (*view).clone());
            if let Some(view) = view {
                renderer.render(&view, out)?;
                writeln!(out, "{TYPING_INDICATOR}")?;
                out.flush()?;
            }
            (&mut pending).await
        }
    };

    if let Some(err) = outcome.error() {
        debug!(
            error = %err,
            user_visible = err.is_user_visible(),
            "Message was not answered"
        );
    }
    Ok(())
}
