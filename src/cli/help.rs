//! Static text shown by the read loop

pub const WELCOME: &str =
    "👋 Hi, I’m your assistant! Type 'help' to see what I can do, or 'quit' to exit.";

pub const GOODBYE: &str = "Goodbye! Take care 💖";

pub const HELP_TITLE: &str = "✨ I can do the following:";

pub const HELP_LINES: [&str; 10] = [
    "say hello <your name>",
    "calculate <a> + <b>",
    "tell me the time/date",
    "weather in <city>",
    "tell me a joke",
    "give me a quote",
    "toss a coin / roll a dice",
    "encouragement for <mood>",
    "convert <value> <from_unit> to <to_unit>",
    "start timer for <seconds>",
];

/// Prefix for errors raised while the assistant handles a message
pub const FAILURE_PREFIX: &str = "Sorry, something went wrong:";
