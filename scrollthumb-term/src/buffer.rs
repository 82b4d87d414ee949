use scrollthumb::Rgb;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            wide_continuation: false,
        }
    }
}

impl Cell {
    pub fn new(char: char) -> Self {
        Self {
            char,
            ..Default::default()
        }
    }

    pub fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    pub fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Write `cell` at `(x, y)`.
    ///
    /// Overwriting half of a wide character breaks it: the other half is
    /// blanked so no cell is left pointing at a glyph that is gone.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);

        if self.cells[idx].wide_continuation && !cell.wide_continuation && x > 0 {
            let lead = &mut self.cells[idx - 1];
            lead.char = ' ';
        }
        if cell.char.width().unwrap_or(1) < 2 && x + 1 < self.width {
            let next = &mut self.cells[idx + 1];
            if next.wide_continuation {
                next.char = ' ';
                next.wide_continuation = false;
            }
        }

        self.cells[idx] = cell;
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Cells to redraw to turn `other` into `self`, which must be the same
    /// size.
    ///
    /// Continuation cells are never reported. When one changed, its wide
    /// character's lead cell is reported instead, since redrawing the glyph
    /// is the only way to repaint that column.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> + 'a {
        let width = self.width as usize;
        (0..self.cells.len()).filter_map(move |i| {
            let cell = &self.cells[i];
            if cell.wide_continuation {
                return None;
            }
            let changed = *cell != other.cells[i];
            let tail_changed = (i + 1) % width != 0
                && self.cells[i + 1].wide_continuation
                && self.cells[i + 1] != other.cells[i + 1];
            if !changed && !tail_changed {
                return None;
            }
            Some(((i % width) as u16, (i / width) as u16, cell))
        })
    }

    /// Set every cell to `cell`. A continuation cell has no lead to follow,
    /// so it is stored as a plain cell.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(Cell {
            wide_continuation: false,
            ..cell
        });
    }

    pub fn clear(&mut self) {
        self.fill(Cell::default());
    }
}
