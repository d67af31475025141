use crate::config::GameConfig;
use crate::core::board::BoardState;
use crate::core::coord::Coord;
use crate::core::moves::MoveRecord;
use crate::core::piece::PieceKind;
use crate::engine::movegen::all_legal_moves;
use crate::engine::perft::perft;
use crate::error::{ConfigError, EngineError};
use crate::game::Game;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

const MAX_PERFT_DEPTH: u32 = 6;

pub struct Console {
    pub game: Game,
}

impl Console {
    pub fn new(game: Game) -> Self {
        Console { game }
    }

    /// Read commands from stdin until `quit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !self.handle_line(line, &mut stdout)? {
                break;
            }
            stdout.flush()?;
        }
        Ok(())
    }

    /// Execute one command line; `Ok(false)` asks the caller to stop
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Ok(true);
        };
        debug!(command, "console command");

        match command {
            "select" | "s" => self.cmd_select(&parts, out)?,
            "move" | "m" => self.cmd_move(&parts, out)?,
            "play" | "p" => self.cmd_play(&parts, out)?,
            "promote" => self.cmd_promote(&parts, out)?,
            "clear" => {
                self.game.state_mut().clear_selection();
                writeln!(out, "ok")?;
            }
            "undo" => {
                let result = self.game.undo();
                self.report(result, out)?;
            }
            "redo" => {
                let result = self.game.redo();
                self.report(result, out)?;
            }
            "moves" => self.cmd_moves(out)?,
            "d" | "display" => self.cmd_display(out)?,
            "fen" => writeln!(out, "{}", self.game.state().to_fen())?,
            "history" => self.cmd_history(out)?,
            "remote" => self.cmd_remote(line, out)?,
            "position" => self.cmd_position(&parts, out)?,
            "perft" => self.cmd_perft(&parts, out)?,
            "quit" | "exit" => return Ok(false),
            other => writeln!(out, "unknown command '{}'", other)?,
        }
        Ok(true)
    }

    fn cmd_select(&mut self, parts: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some(square) = parse_square(parts.get(1)) else {
            return writeln!(out, "usage: select <square>");
        };
        match self.game.state_mut().select_square(square) {
            Ok(available) => {
                let list: Vec<String> = available.iter().map(|c| c.to_string()).collect();
                writeln!(out, "available: {}", list.join(" "))
            }
            Err(err) => writeln!(out, "error: {}", err),
        }
    }

    fn cmd_move(&mut self, parts: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some(square) = parse_square(parts.get(1)) else {
            return writeln!(out, "usage: move <square>");
        };
        let result = self.game.state_mut().move_to(square);
        self.report(result, out)
    }

    fn cmd_play(&mut self, parts: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some((from, to, promotion)) = parts.get(1).and_then(|s| parse_long_move(s)) else {
            return writeln!(out, "usage: play <from><to>[q|r|b|n]");
        };
        let result = self.game.play(from, to, promotion);
        self.report(result, out)
    }

    fn cmd_promote(&mut self, parts: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some(kind) = parts
            .get(1)
            .and_then(|s| s.chars().next())
            .and_then(PieceKind::from_char)
        else {
            return writeln!(out, "usage: promote <q|r|b|n>");
        };
        let state = self.game.state_mut();
        let Some(square) = state.promotion_pending() else {
            return writeln!(out, "error: no promotion pending");
        };
        let result = state.promote(square, kind);
        self.report(result, out)
    }

    fn cmd_moves(&self, out: &mut impl Write) -> io::Result<()> {
        let state = self.game.state();
        for (from, targets) in all_legal_moves(state.position(), state.turn()) {
            let list: Vec<String> = targets.iter().map(|c| c.to_string()).collect();
            writeln!(out, "{}: {}", from, list.join(" "))?;
        }
        Ok(())
    }

    fn cmd_display(&self, out: &mut impl Write) -> io::Result<()> {
        let state = self.game.state();
        write!(out, "{}", state.grid())?;
        writeln!(out)?;
        writeln!(out, "  FEN: {}", state.to_fen())?;
        writeln!(out, "  {}", self.status())
    }

    fn cmd_history(&self, out: &mut impl Write) -> io::Result<()> {
        match serde_json::to_string(self.game.state().undo_stack()) {
            Ok(json) => writeln!(out, "{}", json),
            Err(err) => writeln!(out, "error: {}", err),
        }
    }

    fn cmd_remote(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        let payload = line.trim_start().trim_start_matches("remote").trim();
        let records: Vec<MoveRecord> = match serde_json::from_str(payload) {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "malformed remote move");
                return writeln!(out, "error: {}", err);
            }
        };
        let result = self.game.apply_remote(&records);
        self.report(result, out)
    }

    fn cmd_position(&mut self, parts: &[&str], out: &mut impl Write) -> io::Result<()> {
        let config = match parts.get(1) {
            None | Some(&"startpos") => Ok(GameConfig::default()),
            Some(_) => GameConfig::from_fen(&parts[1..].join(" ")),
        };
        let game = config.and_then(|c| Game::new(&c).map_err(ConfigError::from));
        match game {
            Ok(game) => {
                self.game = game;
                writeln!(out, "ok")
            }
            Err(err) => writeln!(out, "error: {}", err),
        }
    }

    fn cmd_perft(&self, parts: &[&str], out: &mut impl Write) -> io::Result<()> {
        let depth: u32 = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
        if depth > MAX_PERFT_DEPTH {
            return writeln!(out, "error: perft depth is limited to {MAX_PERFT_DEPTH}");
        }
        let start = std::time::Instant::now();
        let nodes = perft(self.game.state(), depth);
        let elapsed = start.elapsed();
        writeln!(out, "Nodes: {} ({} ms)", nodes, elapsed.as_millis())
    }

    fn report(
        &self,
        result: Result<Vec<MoveRecord>, EngineError>,
        out: &mut impl Write,
    ) -> io::Result<()> {
        match result {
            Ok(records) => {
                let list: Vec<String> = records.iter().map(|r| r.to_string()).collect();
                writeln!(out, "ok {} | {}", list.join(" "), self.status())
            }
            Err(err) => writeln!(out, "error: {}", err),
        }
    }

    /// One-line summary of whose turn it is and what they face
    pub fn status(&self) -> String {
        let state: &BoardState = self.game.state();
        if let Some(square) = state.promotion_pending() {
            return format!("promotion pending on {}", square);
        }
        if let Some(winner) = self.game.winner() {
            return format!("checkmate, {} wins", winner);
        }
        if self.game.is_in_check() {
            format!("{} to move, in check", state.turn())
        } else {
            format!("{} to move", state.turn())
        }
    }
}

fn parse_square(arg: Option<&&str>) -> Option<Coord> {
    arg.and_then(|s| Coord::from_algebraic(s))
}

/// Parse `e2e4` or `e7e8q`
fn parse_long_move(s: &str) -> Option<(Coord, Coord, Option<PieceKind>)> {
    let from = Coord::from_algebraic(s.get(0..2)?)?;
    let to = Coord::from_algebraic(s.get(2..4)?)?;
    let promotion = match s.get(4..) {
        None | Some("") => None,
        Some(rest) => {
            let mut chars = rest.chars();
            let kind = chars.next().and_then(PieceKind::from_char)?;
            if chars.next().is_some() || !kind.is_promotion_target() {
                return None;
            }
            Some(kind)
        }
    };
    Some((from, to, promotion))
}
