//! Terminal front end: colored console output and the read loop

mod console;
pub mod help;
pub mod repl;

pub use console::Console;
pub use repl::{failure_message, parse_command, Command, Dispatcher, LoopControl, Repl};
