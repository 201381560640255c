//! Entry point for the `reachmap` command-line interface.
#![forbid(unsafe_code)]

use env_logger::Env;

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on stderr before exiting"
)]
fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(err) = reachmap_cli::run() {
        eprintln!("reachmap: {err}");
        std::process::exit(1);
    }
}
