use colored::*;
use std::io::{self, Write};

use super::help;

/// Console handles all terminal I/O with colored formatting
pub struct Console {
    user_color: Color,
    assistant_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            user_color: Color::Cyan,
            assistant_color: Color::Green,
        }
    }

    /// Print an assistant message prefix (without newline)
    pub fn print_assistant_prefix(&self) {
        print!("\n{} ", "Assistant:".color(self.assistant_color).bold());
        let _ = io::stdout().flush();
    }

    /// Print a chunk of assistant response (for streaming)
    pub fn print_assistant_chunk(&self, chunk: &str) {
        print!("{}", chunk.color(self.assistant_color));
        let _ = io::stdout().flush();
    }

    /// Announce a tool call on its own line
    pub fn print_tool_action(&self, tool_name: &str, action: &str) {
        println!();
        println!(
            "  {} {} {}",
            "⚙".bright_black(),
            tool_name.bright_black().bold(),
            action.bright_black()
        );
    }

    pub fn print_tool_result(&self, output: &str, is_error: bool) {
        if is_error {
            println!("  {} {}", "✗".red(), output.red());
        } else {
            println!("  {} {}", "✓".bright_black(), output.bright_black());
        }
    }

    /// Print a newline
    pub fn println(&self) {
        println!();
    }

    /// Print a system message (errors, info, etc.)
    pub fn print_system(&self, message: &str) {
        println!("{}", message.yellow());
    }

    /// Report a failed turn on stdout, in line with the conversation
    pub fn print_failure(&self, message: &str) {
        println!("{}", message.red());
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{}", error.red());
    }

    /// Read a line of input from the user
    ///
    /// Returns `None` once stdin is closed.
    pub fn read_input(&self) -> io::Result<Option<String>> {
        print!("\n{} ", "You:".color(self.user_color).bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }

    /// Print the welcome greeting
    pub fn print_banner(&self) {
        println!("{}", help::WELCOME.bright_blue().bold());
    }

    /// Print the list of things the assistant can do
    pub fn print_help(&self) {
        println!();
        println!("{}", help::HELP_TITLE.bold());
        for line in help::HELP_LINES {
            println!(" - {}", line);
        }
    }

    pub fn print_goodbye(&self) {
        println!("{}", help::GOODBYE.bright_magenta());
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
