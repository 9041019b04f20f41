use std::io;

mod cli;
use cli::{parse_cli_options, run};

fn main() -> Result<(), io::Error> {
    setup_logging();

    let options = match parse_cli_options() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            eprintln!(
                "Usage: groomsched [--data FILE] (--agenda [YYYY-MM-DD] | --report day|week|month|year [YYYY-MM-DD])"
            );
            std::process::exit(2);
        }
    };

    run(options)
}

fn setup_logging() {
    let log_dir = dirs::config_dir()
        .map(|d| d.join("groomsched"))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "groomsched.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("groomsched started");
}
