//! Console-styled status lines for user-facing output. Diagnostics go
//! through `tracing`; these lines are the product surface.

use console::style;

pub fn text(message: &str) {
    println!("{message}");
}

pub fn success(message: &str) {
    println!("{} {}", style("[OK]").green().bold(), message);
}

pub fn info(message: &str) {
    println!("{} {}", style("[INFO]").cyan().bold(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("[ERROR]").red().bold(), message);
}
