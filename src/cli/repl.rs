//! Read-eval-print loop
//!
//! `idle -> awaiting_input -> (help | quit | dispatch) -> idle`, ending on
//! `quit` or when input closes. Only plain messages reach the dispatcher.

use anyhow::Result;
use async_trait::async_trait;

use super::help::FAILURE_PREFIX;
use super::Console;

/// What a line of user input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Empty,
    /// Anything else, trimmed but otherwise verbatim
    Message(String),
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    match trimmed.to_lowercase().as_str() {
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Message(trimmed.to_string()),
    }
}

/// Text shown when handling a message fails
pub fn failure_message(error: &anyhow::Error) -> String {
    format!("{} {}", FAILURE_PREFIX, error)
}

/// Whether the loop keeps going after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Receives every user message that is not a loop command
#[async_trait]
pub trait Dispatcher: Send {
    async fn dispatch(&mut self, input: &str) -> Result<()>;
}

pub struct Repl<D> {
    console: Console,
    dispatcher: D,
}

impl<D: Dispatcher> Repl<D> {
    pub fn new(console: Console, dispatcher: D) -> Self {
        Self {
            console,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Handle one line of input
    pub async fn handle_line(&mut self, line: &str) -> LoopControl {
        match parse_command(line) {
            Command::Quit => {
                tracing::info!("User requested exit");
                self.console.print_goodbye();
                LoopControl::Exit
            }
            Command::Help => {
                tracing::debug!("Showing help");
                self.console.print_help();
                LoopControl::Continue
            }
            Command::Empty => LoopControl::Continue,
            Command::Message(message) => {
                tracing::info!("Dispatching user message");
                self.console.print_assistant_prefix();
                match self.dispatcher.dispatch(&message).await {
                    Ok(()) => self.console.println(),
                    Err(e) => {
                        tracing::error!("Error processing message: {:?}", e);
                        self.console.println();
                        self.console.print_failure(&failure_message(&e));
                    }
                }
                LoopControl::Continue
            }
        }
    }

    /// Run until the user quits or input closes
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!("Starting read loop");
        self.console.print_banner();

        loop {
            let line = match self.console.read_input() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::info!("Input closed");
                    self.console.println();
                    self.console.print_goodbye();
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to read user input: {}", e);
                    self.console
                        .print_error(&format!("Failed to read input: {}", e));
                    break;
                }
            };

            if self.handle_line(&line).await == LoopControl::Exit {
                break;
            }
        }

        tracing::info!("Read loop ended");
        Ok(())
    }
}
