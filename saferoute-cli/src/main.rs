//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = saferoute_cli::run() {
        eprintln!("saferoute: {err}");
        std::process::exit(1);
    }
}
