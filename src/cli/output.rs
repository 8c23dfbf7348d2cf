use std::io::IsTerminal;

use ansi_term::Colour;

pub fn print_boxed(text: &str) {
    let border = "=".repeat(text.chars().count());
    println!("{border}");
    println!("{text}");
    println!("{border}");
}

fn highlight(text: &str, terminal: bool) -> String {
    if terminal {
        Colour::Red.bold().paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Highlights `text` in red when stdout is a terminal.
pub fn warning(text: &str) -> String {
    highlight(text, std::io::stdout().is_terminal())
}

/// Prints `text` on stderr, in red when stderr is a terminal.
pub fn report(text: &str) {
    eprintln!("{}", highlight(text, std::io::stderr().is_terminal()));
}

/// ` - value` when present, nothing otherwise.
pub fn suffix(separator: &str, value: Option<&str>) -> String {
    value.map(|v| format!("{separator}{v}")).unwrap_or_default()
}
