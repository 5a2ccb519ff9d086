use console::style;

/// Single-line failure output: `❌ <message>` on stderr
pub fn display_error(message: &str) {
    eprintln!("❌ {}", style(message).red());
}

/// Single-line success output: `✅ <message>` on stdout
pub fn display_success(message: &str) {
    println!("✅ {}", style(message).green());
}
