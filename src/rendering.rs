use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::constants::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::types::Rect;

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer[y as usize].iter().collect()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for y in 0..self.height {
            info!("{}", self.row(y));
        }
        info!("---------------------");
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                let s = String::from_utf8_lossy(buf);
                sb.write_str(&s);
                Ok(buf.len())
            },
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- GameGrid: the playfield scaled onto terminal cells ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(' ');
        }
    }

    /// Fills every cell the playfield-space `rect` touches. Anything
    /// outside the playfield is not drawn.
    pub fn fill_rect(&mut self, rect: &Rect, c: char) {
        let left = rect.origin.x.max(0.0);
        let right = (rect.origin.x + rect.width).min(PLAYFIELD_WIDTH);
        let top = rect.origin.y.max(0.0);
        let bottom = (rect.origin.y + rect.height).min(PLAYFIELD_HEIGHT);
        if left >= right || top >= bottom {
            return;
        }

        let (first_col, last_col) = self.span(left, right, PLAYFIELD_WIDTH, self.width);
        let (first_row, last_row) = self.span(top, bottom, PLAYFIELD_HEIGHT, self.height);
        for y in first_row..=last_row {
            for x in first_col..=last_col {
                self.set_char(x, y, c);
            }
        }
    }

    pub fn write_text(&mut self, x: u16, y: u16, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set_char(x.saturating_add(i as u16), y, c);
        }
    }

    /// Writes `text` horizontally centered on row `y`.
    pub fn write_centered(&mut self, y: u16, text: &str) {
        let x = (self.width / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.write_text(x, y, text);
    }

    // Cells covering [start, end) on an axis of `extent` units mapped onto `cells` cells.
    fn span(&self, start: f64, end: f64, extent: f64, cells: u16) -> (u16, u16) {
        let scale = f64::from(cells) / extent;
        let last_cell = cells.saturating_sub(1);
        let first = ((start * scale).floor() as u16).min(last_cell);
        let last = (((end * scale).ceil() as u16).saturating_sub(1)).clamp(first, last_cell);
        (first, last)
    }

    pub fn render(&self, stdout: &mut OutputTarget, top: u16) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, top + y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget, terminal_width: u16, terminal_height: u16) -> io::Result<()> {
        for y in 0..terminal_height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(terminal_width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector2D;

    fn row(grid: &GameGrid, y: u16) -> String {
        grid.grid[y as usize].iter().collect()
    }

    #[test]
    fn rect_scales_onto_cells() {
        // 60x30 cells: each cell is 10x10 playfield units.
        let mut grid = GameGrid::new(60, 30);
        grid.fill_rect(&Rect::new(Vector2D::new(300.0, 150.0), 25.0, 25.0), 'A');

        assert_eq!(grid.grid[15][30], 'A');
        assert_eq!(grid.grid[17][32], 'A');
        assert_eq!(grid.grid[18][33], ' ');
        assert_eq!(grid.grid[14][30], ' ');
    }

    #[test]
    fn off_field_rects_are_skipped_and_edges_clipped() {
        let mut grid = GameGrid::new(60, 30);
        grid.fill_rect(&Rect::new(Vector2D::new(900.0, 10.0), 20.0, 20.0), '@');
        assert!((0..30).all(|y| !row(&grid, y).contains('@')));

        grid.fill_rect(&Rect::new(Vector2D::new(590.0, 290.0), 20.0, 20.0), '@');
        assert_eq!(grid.grid[29][59], '@');
    }

    #[test]
    fn centered_text_lands_mid_row() {
        let mut grid = GameGrid::new(20, 3);
        grid.write_centered(1, "Game Over");
        assert_eq!(row(&grid, 1), "      Game Over     ");
    }

    #[test]
    fn screen_buffer_captures_writes() {
        let mut target = OutputTarget::ScreenBuffer(ScreenBuffer::new(12, 2));
        target.execute_move_to(MoveTo(2, 1)).unwrap();
        write!(target, "Score: 3").unwrap();
        if let OutputTarget::ScreenBuffer(sb) = &target {
            assert_eq!(sb.row(1), "  Score: 3  ");
        } else {
            panic!("expected a screen buffer");
        }
    }
}
