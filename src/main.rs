use clap::Parser;
use log::LevelFilter;
use xiangqi_engine::{Config, Engine};

pub mod tui;

#[derive(Parser)]
struct Arguments {
    /// Position to start from instead of the standard layout.
    #[arg(long)]
    fen: Option<String>,
    /// Print the board without colors.
    #[arg(long)]
    no_color: bool,
    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let arguments = Arguments::parse();

    let level = match arguments.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let config = arguments.fen.map(Config::with_start_fen).unwrap_or_default();
    let engine = match Engine::with_config(&config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("invalid start position: {}", err);
            std::process::exit(2);
        }
    };

    let options = tui::Options {
        color: !arguments.no_color,
    };
    if let Err(err) = tui::run(engine, &options) {
        eprintln!("terminal error: {}", err);
        std::process::exit(1);
    }
}
