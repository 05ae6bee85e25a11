use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::board::CastleBlock;
use crate::error::Error;
use crate::types::{CastleWing, Piece, Side, Square};

/// In-memory game log. Lines are buffered and only touch the disk through
/// `save_to_file`.
#[derive(Debug, Clone)]
pub struct GameLogger {
    pub log_buffer: String,
    pub advanced_logging: bool,
    game_start_time: Instant,
    move_count: u32,
    indent_level: usize,
}

impl GameLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(64 * 1024),
            advanced_logging: false,
            game_start_time: Instant::now(),
            move_count: 0,
            indent_level: 0,
        };

        logger.log("🎯 === Chess Game Log Started ===");
        logger.log(&format!("📅 Date: {}", chrono::Local::now().format("%m/%d/%Y %H:%M:%S")));
        logger
    }

    pub fn should_log_advanced(&self) -> bool {
        self.advanced_logging
    }

    pub fn enable_advanced_logging(&mut self) {
        self.advanced_logging = true;
        self.log("🔬 Advanced logging enabled");
    }

    pub fn disable_advanced_logging(&mut self) {
        self.advanced_logging = false;
        self.log("📊 Advanced logging disabled");
    }

    pub fn log(&mut self, message: &str) {
        self.log_buffer.push_str(message);
        self.log_buffer.push('\n');
    }

    pub fn log_with_indent(&mut self, message: &str) {
        let indent = "  ".repeat(self.indent_level);
        self.log_buffer.push_str(&format!("{}{}\n", indent, message));
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn log_game_start(&mut self) {
        self.move_count = 0;
        self.indent_level = 0;
        self.game_start_time = Instant::now();
        self.log("♟️ New game: White to move");
    }

    pub fn log_selection(&mut self, square: Square, piece: Piece, paths: &[Square]) {
        if self.should_log_advanced() {
            let targets: Vec<String> = paths.iter().map(Square::to_string).collect();
            self.log_with_indent(&format!(
                "👆 Selected {} on {} | {} destinations: [{}]",
                piece,
                square,
                paths.len(),
                targets.join(", ")
            ));
        }
    }

    pub fn log_check_filter(&mut self, side: Side, before: usize, after: usize) {
        if self.should_log_advanced() {
            self.log_with_indent(&format!(
                "🛡️ {} in check: {} of {} candidates resolve it",
                side, after, before
            ));
        }
    }

    pub fn log_move(&mut self, from: Square, to: Square, piece: Piece, captured: Option<Piece>) {
        self.move_count += 1;
        let elapsed = self.game_start_time.elapsed().as_millis();
        match captured {
            Some(victim) => self.log(&format!(
                "{}. {} {}x{} (captures {}) [{}ms]",
                self.move_count, piece, from, to, victim, elapsed
            )),
            None => self.log(&format!(
                "{}. {} {}-{} [{}ms]",
                self.move_count, piece, from, to, elapsed
            )),
        }
    }

    pub fn log_castle(&mut self, side: Side, wing: CastleWing) {
        self.move_count += 1;
        let notation = match wing {
            CastleWing::Kingside => "O-O",
            CastleWing::Queenside => "O-O-O",
        };
        self.log(&format!("{}. {} {} 🏰", self.move_count, side, notation));
    }

    pub fn log_check(&mut self, side: Side) {
        self.log_with_indent(&format!("⚠️ {} is in check", side));
    }

    pub fn log_checkmate(&mut self, loser: Side) {
        self.log(&format!(
            "🏁 Checkmate! {} wins after {} moves",
            loser.opposite(),
            self.move_count
        ));
    }

    pub fn log_rejected_move(&mut self, from: Square, to: Square) {
        self.log_with_indent(&format!("❌ Rejected move {}-{}", from, to));
    }

    pub fn log_castle_skipped(&mut self, side: Side, wing: CastleWing, reason: CastleBlock) {
        self.log_with_indent(&format!(
            "🚧 {} castle {:?} skipped: {:?}",
            side, wing, reason
        ));
    }

    pub fn log_ignored(&mut self, what: &str) {
        if self.should_log_advanced() {
            self.log_with_indent(&format!("💤 Ignored: {}", what));
        }
    }

    /// Write the buffer to `logs/<timestamp>.txt` and return the path.
    pub fn save_to_file(&mut self, reason: &str) -> Result<String, Error> {
        self.save_to_dir("logs", reason)
    }

    pub fn save_to_dir(&mut self, dir: impl AsRef<Path>, reason: &str) -> Result<String, Error> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let now = chrono::Local::now();
        let path = dir.join(format!("{}.txt", now.format("%m_%d_%Y_%H_%M_%S")));

        self.log(&format!("💾 Game ended: {} - Saving log", reason));

        let mut file = File::create(&path)?;
        file.write_all(self.log_buffer.as_bytes())?;
        Ok(path.display().to_string())
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}
