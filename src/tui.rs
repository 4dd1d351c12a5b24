//! The textual user interface: two players sharing one terminal.

use crossterm::style::Stylize;
use log::debug;
use std::io::{self, BufRead, Write};
use xiangqi_engine::constants::{FILES, RANKS};
use xiangqi_engine::{Board, Color, Engine, Move, Square};

pub struct Options {
    pub color: bool,
}

/// Runs the main game loop for the text-based UI.
pub fn run(mut engine: Engine, options: &Options) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    writeln!(out, "--- Xiangqi ---")?;
    writeln!(out, "Enter moves as two squares (e.g. h3 e3). Type 'exit' to quit.")?;

    loop {
        writeln!(out)?;
        render(&mut out, engine.snapshot_board(), options)?;

        let outcome = engine.get_game_state();
        if let Some(winner) = outcome.winner() {
            writeln!(out, "Game over: {} wins.", capitalize(winner))?;
            return Ok(());
        }

        let turn = engine.get_turn();
        if engine.is_in_check(turn) {
            writeln!(out, "{} is in check!", capitalize(turn))?;
        }
        write!(out, "{} to move: ", capitalize(turn))?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        if line == "exit" || line == "quit" {
            return Ok(());
        }

        let mv: Move = match line.parse() {
            Ok(mv) => mv,
            Err(err) => {
                writeln!(out, "Could not read move: {}", err)?;
                continue;
            }
        };
        if let Err(err) = engine.try_move(mv.from, mv.to) {
            debug!("user move {} rejected: {:?}", mv, err);
            writeln!(out, "Illegal move: {}.", err)?;
        }
    }
}

fn capitalize(color: Color) -> &'static str {
    match color {
        Color::Red => "Red",
        Color::Black => "Black",
    }
}

/// Draws the board with rank 10 on top, Red pieces in red.
fn render(out: &mut impl Write, board: &Board, options: &Options) -> io::Result<()> {
    writeln!(out, "    +-------------------+")?;
    for rank in (0..RANKS).rev() {
        write!(out, "{:>3} | ", rank + 1)?;
        for file in 0..FILES {
            match board.get(Square::new(rank, file)) {
                Some(piece) => {
                    let c = piece.to_fen_char().to_string();
                    if options.color && piece.color == Color::Red {
                        write!(out, "{} ", c.red().bold())?;
                    } else if options.color {
                        write!(out, "{} ", c.bold())?;
                    } else {
                        write!(out, "{} ", c)?;
                    }
                }
                None => write!(out, ". ")?,
            }
        }
        writeln!(out, "|")?;
        if rank == 5 {
            writeln!(out, "    |~~~~~~ river ~~~~~~|")?;
        }
    }
    writeln!(out, "    +-------------------+")?;
    writeln!(out, "      a b c d e f g h i")
}
