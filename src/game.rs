//! Go game state and move execution.
//!
//! This module provides the rules engine:
//! - Stone placement with capture resolution before the suicide check
//! - Single-stone ko enforcement
//! - Pass counting and game termination
//! - Territory plus captures scoring
//!
//! Rejected moves restore a full value copy of the state taken before the
//! attempt, so the move log, capture tallies and ko marker never drift.

use crate::board::{Board, Color, Point, column_letter};
use crate::constants::{DEFAULT_BOARD_SIZE, PASS_LIMIT};
use crate::error::{MoveError, ParseError};

/// A move: place a stone at `(row, col)` or pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Place(Point),
    Pass,
}

impl Move {
    #[inline]
    pub fn at(row: usize, col: usize) -> Self {
        Move::Place((row, col))
    }
}

/// Game outcome tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Winner {
    Black,
    White,
    Tie,
}

/// Territory plus captures for each color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Score {
    pub winner: Winner,
    pub black: usize,
    pub white: usize,
}

impl Score {
    pub fn of(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Own total minus opponent total from `color`'s point of view.
    pub fn margin(&self, color: Color) -> i64 {
        self.of(color) as i64 - self.of(color.opponent()) as i64
    }
}

/// A stone-placing move as logged: `(row, col, player)`.
pub type LoggedMove = (usize, usize, Color);

/// Full game state. `Clone` is a deep, independent copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Color,
    moves: Vec<LoggedMove>,
    potential_ko: Option<Point>,
    pass_counter: u32,
    black_captures: usize,
    white_captures: usize,
    is_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl GameState {
    /// Empty `size`x`size` board with Black to move.
    ///
    /// Panics unless `1 <= size <= MAX_BOARD_SIZE`, as [`Board::new`] does.
    pub fn new(size: usize) -> Self {
        Self::from_board(Board::new(size))
    }

    /// Start from an arbitrary layout with Black to move and all counters zeroed.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            current_player: Color::Black,
            moves: Vec::new(),
            potential_ko: None,
            pass_counter: 0,
            black_captures: 0,
            white_captures: 0,
            is_over: false,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn opposing_player(&self) -> Color {
        self.current_player.opponent()
    }

    /// Stone-placing moves in order. Passes are not logged.
    pub fn moves(&self) -> &[LoggedMove] {
        &self.moves
    }

    /// Point where the side to move may not make a single-stone recapture.
    pub fn potential_ko(&self) -> Option<Point> {
        self.potential_ko
    }

    pub fn pass_counter(&self) -> u32 {
        self.pass_counter
    }

    /// Stones captured so far by `color`.
    pub fn captures(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black_captures,
            Color::White => self.white_captures,
        }
    }

    fn captures_mut(&mut self, color: Color) -> &mut usize {
        match color {
            Color::Black => &mut self.black_captures,
            Color::White => &mut self.white_captures,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Value copy of the whole state for later [`restore`](Self::restore).
    pub fn snapshot(&self) -> GameState {
        self.clone()
    }

    pub fn restore(&mut self, saved: GameState) {
        *self = saved;
    }

    /// Apply a move for the current player.
    ///
    /// On success returns the enemy stones removed by the move (empty for a
    /// pass). On failure the state is left exactly as it was.
    pub fn make_move(&mut self, mv: Move) -> Result<Vec<Point>, MoveError> {
        if self.is_over {
            return Err(MoveError::GameOver);
        }

        let pt = match mv {
            Move::Pass => {
                self.pass_move();
                return Ok(Vec::new());
            }
            Move::Place(pt) => pt,
        };

        let (row, col) = pt;
        if !self.board.in_bounds(row, col) {
            return Err(MoveError::OutOfBounds { row, col });
        }
        if !self.board.is_empty_at(pt) {
            return Err(MoveError::Occupied { row, col });
        }

        let saved = self.snapshot();
        match self.place_stone(pt) {
            Ok(captured) => Ok(captured),
            Err(e) => {
                self.restore(saved);
                Err(e)
            }
        }
    }

    /// Pass: clears ko and ends the game on the fourth consecutive pass.
    fn pass_move(&mut self) {
        self.potential_ko = None;
        self.pass_counter += 1;
        self.current_player = self.current_player.opponent();
        if self.pass_counter >= PASS_LIMIT {
            self.is_over = true;
        }
    }

    /// Place a stone on an empty on-board point. May leave the state
    /// half-updated on error; the caller restores its snapshot.
    fn place_stone(&mut self, pt: Point) -> Result<Vec<Point>, MoveError> {
        let mover = self.current_player;
        self.board.set(pt, Some(mover));
        self.moves.push((pt.0, pt.1, mover));

        // Captures resolve before the suicide check.
        let mut captured = Vec::new();
        for group in self.board.find_groups() {
            if group.captured && group.color != mover {
                for &s in &group.stones {
                    self.board.set(s, None);
                }
                captured.extend(group.stones);
            }
        }
        *self.captures_mut(mover) += captured.len();

        if self
            .board
            .find_groups()
            .iter()
            .any(|g| g.captured && g.color == mover)
        {
            return Err(MoveError::SelfCapture);
        }

        if captured.len() == 1 {
            if let Some(ko) = self.potential_ko
                && is_adjacent(pt, ko)
            {
                return Err(MoveError::Ko);
            }
            self.potential_ko = Some(pt);
        } else {
            self.potential_ko = None;
        }

        self.current_player = mover.opponent();
        self.pass_counter = 0;
        Ok(captured)
    }

    /// Every legal move for the side to move: pass first, then points in
    /// row-major order. Each point is tried on a scratch copy, so `self` is
    /// never touched.
    pub fn valid_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        if self.is_over {
            return moves;
        }
        if self.pass_counter < PASS_LIMIT {
            moves.push(Move::Pass);
        }

        let mut scratch = self.clone();
        for pt in self.board.points() {
            if !self.board.is_empty_at(pt) {
                continue;
            }
            if scratch.make_move(Move::Place(pt)).is_ok() {
                moves.push(Move::Place(pt));
                scratch.clone_from(self);
            }
        }
        moves
    }

    /// Owned territory plus captures for each color.
    pub fn score(&self) -> Score {
        let (black_territory, white_territory) = self.board.count_territory();
        let black = black_territory + self.black_captures;
        let white = white_territory + self.white_captures;
        let winner = match black.cmp(&white) {
            std::cmp::Ordering::Greater => Winner::Black,
            std::cmp::Ordering::Less => Winner::White,
            std::cmp::Ordering::Equal => Winner::Tie,
        };
        Score {
            winner,
            black,
            white,
        }
    }
}

/// True if two points are orthogonal neighbors.
#[inline]
pub fn is_adjacent(a: Point, b: Point) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}

/// Parse a vertex such as `"C3"` or `"pass"` on a `size`x`size` board.
///
/// Columns are letters skipping `I`; rows count up from the bottom edge.
pub fn parse_move(s: &str, size: usize) -> Result<Move, ParseError> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("pass") {
        return Ok(Move::Pass);
    }
    let invalid = || ParseError::InvalidVertex(s.to_string());

    let mut chars = s.chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() || letter == 'I' {
        return Err(invalid());
    }
    let mut col = (letter as u8 - b'A') as usize;
    if letter > 'I' {
        col -= 1;
    }

    let number: usize = chars.as_str().parse().map_err(|_| invalid())?;
    if number == 0 || number > size || col >= size {
        return Err(invalid());
    }
    Ok(Move::at(size - number, col))
}

/// Format a move as a vertex string (`"C3"`, `"pass"`).
pub fn str_move(mv: Move, size: usize) -> String {
    match mv {
        Move::Pass => "pass".into(),
        Move::Place((row, col)) => format!("{}{}", column_letter(col), size - row),
    }
}
