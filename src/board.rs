//! Square Go board with group and territory analysis.
//!
//! The board is a row-major `Vec` of optional stones. Points are `(row, col)`
//! pairs with row 0 at the top edge. All analysis here is read-only and
//! recomputed on demand by flood fill over 4-adjacency.

use std::fmt;

use crate::constants::{EMPTY, MAX_BOARD_SIZE, STONE_BLACK, STONE_WHITE};
use crate::error::ParseError;

/// Stone color, also used to name the players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other color.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Board glyph for this color.
    pub fn glyph(self) -> char {
        match self {
            Color::Black => STONE_BLACK,
            Color::White => STONE_WHITE,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// A point on the board as `(row, col)`.
pub type Point = (usize, usize);

/// A maximal 4-connected set of same-colored stones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub color: Color,
    pub stones: Vec<Point>,
    /// True when no member stone touches an empty point.
    pub captured: bool,
}

/// A maximal 4-connected set of empty points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Territory {
    pub points: Vec<Point>,
    /// The only color bordering the region, or `None` if it borders both or neither.
    pub owner: Option<Color>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Empty `size` x `size` board.
    ///
    /// # Panics
    /// Panics unless `1 <= size <= MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Self {
        assert!(
            (1..=MAX_BOARD_SIZE).contains(&size),
            "board size must be between 1 and {MAX_BOARD_SIZE}, got {size}"
        );
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `X`/`B` are Black stones, `O`/`W` are White stones, `.`/`+`/space are empty.
    /// Whitespace between cells is not allowed, so `"X.O"` is a 3-wide row.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ParseError> {
        let size = rows.len();
        if size == 0 {
            return Err(ParseError::RaggedRows {
                expected: 1,
                got: 0,
                row: 0,
            });
        }
        if size > MAX_BOARD_SIZE {
            return Err(ParseError::TooLarge {
                size,
                max: MAX_BOARD_SIZE,
            });
        }
        let mut board = Board::new(size);
        for (row, line) in rows.iter().enumerate() {
            let got = line.chars().count();
            if got != size {
                return Err(ParseError::RaggedRows {
                    expected: size,
                    got,
                    row,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let stone = match ch.to_ascii_uppercase() {
                    'X' | 'B' => Some(Color::Black),
                    'O' | 'W' => Some(Color::White),
                    '.' | '+' | ' ' => None,
                    character => {
                        return Err(ParseError::InvalidCell {
                            character,
                            row,
                            col,
                        });
                    }
                };
                board.set((row, col), stone);
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    #[inline]
    fn idx(&self, (row, col): Point) -> usize {
        row * self.size + col
    }

    /// Stone at `pt`, or `None` for an empty or off-board point.
    pub fn get(&self, pt: Point) -> Option<Color> {
        if !self.in_bounds(pt.0, pt.1) {
            return None;
        }
        self.cells[self.idx(pt)]
    }

    /// Set or clear the stone at `pt`.
    ///
    /// # Panics
    /// Panics if `pt` is off the board.
    pub fn set(&mut self, pt: Point, stone: Option<Color>) {
        assert!(
            self.in_bounds(pt.0, pt.1),
            "point {pt:?} is off a {0}x{0} board",
            self.size
        );
        let i = self.idx(pt);
        self.cells[i] = stone;
    }

    #[inline]
    pub fn is_empty_at(&self, pt: Point) -> bool {
        self.in_bounds(pt.0, pt.1) && self.cells[self.idx(pt)].is_none()
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size).flat_map(move |r| (0..self.size).map(move |c| (r, c)))
    }

    /// Orthogonal on-board neighbors of `pt`.
    pub fn neighbors(&self, (row, col): Point) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        let mut v = Vec::with_capacity(4);
        if row > 0 {
            v.push((row - 1, col));
        }
        if row + 1 < s {
            v.push((row + 1, col));
        }
        if col > 0 {
            v.push((row, col - 1));
        }
        if col + 1 < s {
            v.push((row, col + 1));
        }
        v.into_iter()
    }

    /// Number of stones of either color on the board.
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Collect the 4-connected region containing `start` whose cells equal
    /// `self.get(start)`, marking members in `visited`.
    fn flood_fill(&self, start: Point, visited: &mut [bool]) -> Vec<Point> {
        let target = self.get(start);
        let mut stack = vec![start];
        let mut out = Vec::new();

        while let Some(pt) = stack.pop() {
            let i = self.idx(pt);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            out.push(pt);
            for n in self.neighbors(pt) {
                if !visited[self.idx(n)] && self.get(n) == target {
                    stack.push(n);
                }
            }
        }
        out
    }

    /// Find every group on the board, flagging those with zero liberties.
    pub fn find_groups(&self) -> Vec<Group> {
        let mut visited = vec![false; self.size * self.size];
        let mut groups = Vec::new();

        for pt in self.points() {
            let Some(color) = self.get(pt) else {
                continue;
            };
            if visited[self.idx(pt)] {
                continue;
            }
            let stones = self.flood_fill(pt, &mut visited);
            let captured = !stones
                .iter()
                .any(|&s| self.neighbors(s).any(|n| self.get(n).is_none()));
            groups.push(Group {
                color,
                stones,
                captured,
            });
        }
        groups
    }

    /// Find every empty region and the single color (if any) enclosing it.
    pub fn find_territory(&self) -> Vec<Territory> {
        let mut visited = vec![false; self.size * self.size];
        let mut regions = Vec::new();

        for pt in self.points() {
            if self.get(pt).is_some() || visited[self.idx(pt)] {
                continue;
            }
            let points = self.flood_fill(pt, &mut visited);

            let mut black = false;
            let mut white = false;
            for &p in &points {
                for n in self.neighbors(p) {
                    match self.get(n) {
                        Some(Color::Black) => black = true,
                        Some(Color::White) => white = true,
                        None => {}
                    }
                }
                if black && white {
                    break;
                }
            }
            let owner = match (black, white) {
                (true, false) => Some(Color::Black),
                (false, true) => Some(Color::White),
                _ => None,
            };
            regions.push(Territory { points, owner });
        }
        regions
    }

    /// Owned territory per color as `(black, white)`.
    pub fn count_territory(&self) -> (usize, usize) {
        self.find_territory()
            .iter()
            .fold((0, 0), |(b, w), region| match region.owner {
                Some(Color::Black) => (b + region.points.len(), w),
                Some(Color::White) => (b, w + region.points.len()),
                None => (b, w),
            })
    }
}

/// Column label for `col`, skipping `I` as Go boards do.
///
/// # Panics
/// Panics if `col >= MAX_BOARD_SIZE`; there are no letters past `Z`.
pub fn column_letter(col: usize) -> char {
    assert!(col < MAX_BOARD_SIZE, "no column letter for index {col}");
    let c = b'A' + col as u8;
    if c >= b'I' { (c + 1) as char } else { c as char }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, "{} ", column_letter(col))?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:2} ", self.size - row)?;
            for col in 0..self.size {
                let ch = self.get((row, col)).map_or(EMPTY, Color::glyph);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
