use clap::Parser;
use log::{debug, info, warn, LevelFilter};
use std::io::{self, BufRead, Write};
use xiangqi_engine::{Color, Config, Engine, Move};

#[derive(Parser)]
struct Arguments {
    /// Position new games start from.
    #[arg(long)]
    fen: Option<String>,
    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Drives one game from line commands.
struct Referee {
    config: Config,
    engine: Engine,
}

impl Referee {
    fn new(config: Config) -> Result<Self, xiangqi_engine::FenError> {
        let engine = Engine::with_config(&config)?;
        Ok(Self { config, engine })
    }

    /// Handles one command line. Returns `false` once the session should end.
    fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(command) = parts.first() else {
            return Ok(true);
        };
        match *command {
            "newgame" => match Engine::with_config(&self.config) {
                Ok(engine) => {
                    self.engine = engine;
                    writeln!(out, "ok")?;
                }
                Err(err) => writeln!(out, "error {}", err)?,
            },
            "position" => {
                if parts.get(1) != Some(&"fen") {
                    writeln!(out, "error expected 'position fen <FEN>'")?;
                    return Ok(true);
                }
                match Engine::from_fen(&parts[2..].join(" ")) {
                    Ok(engine) => {
                        self.engine = engine;
                        writeln!(out, "ok")?;
                        self.report_game_over(out)?;
                    }
                    Err(err) => writeln!(out, "error {}", err)?,
                }
            }
            "move" => match parts[1..].join(" ").parse::<Move>() {
                Ok(mv) => match self.engine.try_move(mv.from, mv.to) {
                    Ok(()) => {
                        writeln!(out, "ok")?;
                        self.report_game_over(out)?;
                    }
                    Err(err) => writeln!(out, "illegal {}", err)?,
                },
                Err(err) => writeln!(out, "error {}", err)?,
            },
            "state" => writeln!(out, "{}", self.engine.get_game_state())?,
            "turn" => writeln!(out, "{}", self.engine.get_turn())?,
            "check" => {
                let color = match parts.get(1) {
                    Some(&"red") => Color::Red,
                    Some(&"black") => Color::Black,
                    _ => {
                        writeln!(out, "error expected 'check <red|black>'")?;
                        return Ok(true);
                    }
                };
                writeln!(out, "{}", self.engine.is_in_check(color))?;
            }
            "moves" => {
                let moves: Vec<String> = self.engine.legal_moves().iter().map(Move::to_string).collect();
                writeln!(out, "{}", moves.join(" "))?;
            }
            "board" => write!(out, "{}", self.engine.snapshot_board())?,
            "fen" => writeln!(out, "{}", self.engine.to_fen())?,
            "quit" => return Ok(false),
            _ => {
                debug!("unknown command '{}'", line);
                writeln!(out, "error unknown command")?;
            }
        }
        Ok(true)
    }

    fn report_game_over(&self, out: &mut impl Write) -> io::Result<()> {
        let outcome = self.engine.get_game_state();
        if outcome.is_terminal() {
            writeln!(out, "gameover {}", outcome)?;
        }
        Ok(())
    }
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

    let config = match arguments.fen {
        Some(fen) => Config::with_start_fen(fen),
        None => Config::default(),
    };
    let mut referee = match Referee::new(config) {
        Ok(referee) => referee,
        Err(err) => {
            eprintln!("invalid start position: {}", err);
            std::process::exit(2);
        }
    };
    info!("referee ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("failed to read input: {}", err);
                break;
            }
        };
        debug!("received: {}", line);
        match referee.handle_line(&line, &mut out).and_then(|more| out.flush().map(|_| more)) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                warn!("failed to write output: {}", err);
                break;
            }
        }
    }
}
