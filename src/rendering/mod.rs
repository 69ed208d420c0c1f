//! # Rendering Module
//!
//! Plain-text board rendering for terminals and logs.
//!
//! A grid of dimension N becomes a (2N+1)-square character board. Cells
//! sit on odd rows and columns, wall slots between them and posts on the
//! even-even corners.

use crate::{Grid, Orientation, Role};

/// Characters used to draw a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub post: char,
    pub horizontal_wall: char,
    pub vertical_wall: char,
    pub open: char,
    pub floor: char,
    pub player: char,
    pub enemy: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            post: '+',
            horizontal_wall: '-',
            vertical_wall: '|',
            open: ' ',
            floor: '.',
            player: '@',
            enemy: 'E',
        }
    }
}

/// Renders grids as text.
#[derive(Debug, Clone, Default)]
pub struct AsciiRenderer {
    glyphs: Glyphs,
}

impl AsciiRenderer {
    /// Creates a renderer with the default glyphs.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_glyphs(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }

    /// Draws the board. Characters outside the grid are not shown.
    ///
    /// # Examples
    ///
    /// ```
    /// use hedgerow::{AsciiRenderer, Character, Coords, Grid, RandomWallLayout};
    ///
    /// let mut grid = Grid::new(2, 100.0, &RandomWallLayout::new()).unwrap();
    /// grid.add_character(Character::player(Coords::new(0, 1)));
    ///
    /// let board = AsciiRenderer::new().render(&grid);
    /// assert_eq!(board, "+-+-+\n|. .|\n+ + +\n|@ .|\n+-+-+");
    /// ```
    pub fn render(&self, grid: &Grid) -> String {
        let n = grid.dimension().max(0) as usize;
        let size = 2 * n + 1;
        let mut board = vec![vec![self.glyphs.open; size]; size];

        for (y, line) in board.iter_mut().enumerate() {
            for (x, slot) in line.iter_mut().enumerate() {
                if x % 2 == 0 && y % 2 == 0 {
                    *slot = self.glyphs.post;
                } else if x % 2 == 1 && y % 2 == 1 {
                    *slot = self.glyphs.floor;
                }
            }
        }

        for wall in grid.walls().iter() {
            let (x, y, glyph) = match wall.orientation {
                Orientation::Horizontal => (
                    2 * wall.anchor.col + 1,
                    2 * wall.anchor.row,
                    self.glyphs.horizontal_wall,
                ),
                Orientation::Vertical => (
                    2 * wall.anchor.col,
                    2 * wall.anchor.row + 1,
                    self.glyphs.vertical_wall,
                ),
            };
            if let Some(slot) = slot_mut(&mut board, x, y) {
                *slot = glyph;
            }
        }

        for character in grid.characters().iter() {
            if !grid.in_bounds(character.coords) {
                continue;
            }
            let glyph = match character.role {
                Role::Player => self.glyphs.player,
                Role::Enemy => self.glyphs.enemy,
            };
            let (x, y) = (2 * character.coords.col + 1, 2 * character.coords.row + 1);
            if let Some(slot) = slot_mut(&mut board, x, y) {
                *slot = glyph;
            }
        }

        board
            .into_iter()
            .map(|line| line.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn slot_mut(board: &mut [Vec<char>], x: i32, y: i32) -> Option<&mut char> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;
    board.get_mut(y)?.get_mut(x)
}
