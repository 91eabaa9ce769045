mod app;
mod cli;
mod constants;
mod domain;
mod pie;

fn main() {
    // No arguments drops straight into the demo board.
    if std::env::args().len() <= 1 {
        if let Err(e) = app::run_ui() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    } else {
        cli::run_cli();
    }
}
