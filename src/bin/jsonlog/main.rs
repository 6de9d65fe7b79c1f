// src/bin/jsonlog/main.rs
use clap::Parser;
use jsonlog::{Cli, run};
use logging::{StderrMode, SubscriberConfig};

fn main() {
    let cli = Cli::parse();
    let diagnostics = SubscriberConfig::builder()
        .verbose(cli.verbose)
        .stderr(StderrMode::All)
        .build();
    if let Err(err) = logging::init(diagnostics) {
        eprintln!("jsonlog: failed to initialise diagnostics: {err}");
    }
    if let Err(err) = run(cli) {
        eprintln!("jsonlog: {err}");
        std::process::exit(err.exit_code());
    }
}
