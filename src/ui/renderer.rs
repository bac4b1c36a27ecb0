/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Compose the next frame into the `front` buffer (array of Cell)
///   2. Compare each cell with `back` (previous frame)
///   3. Only emit terminal commands for cells that changed, batched with `queue!`
///   4. Swap front/back
///
/// Screen layout, top to bottom:
///   nav bar | main panel (length prompt / spelling grid / game over) |
///   color legend | message bar. Help and About overlays draw last.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::marks::LetterMark;
use crate::sim::session::{Overlay, Phase, Reveal, SessionState};

// ── Palette ──

const BASE_BG: Color = Color::Rgb { r: 24, g: 26, b: 34 };
const TEXT: Color = Color::Rgb { r: 225, g: 228, b: 235 };
const DIM: Color = Color::Rgb { r: 110, g: 115, b: 130 };
const ACCENT: Color = Color::Rgb { r: 70, g: 140, b: 255 };
const GOOD: Color = Color::Rgb { r: 60, g: 200, b: 110 };
const BAD: Color = Color::Rgb { r: 235, g: 80, b: 80 };
const WARN: Color = Color::Rgb { r: 240, g: 150, b: 50 };

fn mark_color(m: LetterMark) -> Color {
    match m {
        LetterMark::Correct => Color::Rgb { r: 34, g: 197, b: 94 },
        LetterMark::Misplaced => Color::Rgb { r: 234, g: 179, b: 8 },
        LetterMark::Incorrect => Color::Rgb { r: 156, g: 163, b: 175 },
    }
}

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', fg: TEXT, bg: BASE_BG };

    /// Sentinel that differs from any real cell, forcing a full repaint.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        let bg = if bg == Color::Reset { BASE_BG } else { bg };
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Returns the column after the last char.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) -> usize {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width { break; }
            self.set(cx, y, Cell::new(ch, fg, bg));
            cx += 1;
        }
        cx
    }

    /// Write a string centered on row `y`.
    fn put_center(&mut self, y: usize, s: &str, fg: Color) {
        let x = self.width.saturating_sub(s.chars().count()) / 2;
        self.put_str(x, y, s, fg, Color::Reset);
    }

    fn fill_row(&mut self, y: usize, ch: char, fg: Color, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(ch, fg, bg));
        }
    }
}

// ── Renderer ──

const NAV_ROW: usize = 0;
const PANEL_ROW: usize = 3;
/// Rows reserved at the bottom: legend (4) + gap + message bar.
const FOOTER_ROWS: usize = 6;
/// Grid cell: "┌───┐" plus one column gap.
const BOX_W: usize = 6;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            EnableBracketedPaste,
            cursor::Hide,
            SetBackgroundColor(BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize(tw as usize, th as usize);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            DisableBracketedPaste,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.term_w = w;
        self.term_h = h;
        self.front.resize(w, h);
        self.back.resize(w, h);
        self.back.cells.fill(Cell::INVALID);
    }

    pub fn render(&mut self, s: &SessionState) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.resize(tw as usize, th as usize);
            queue!(self.writer, SetBackgroundColor(BASE_BG), Clear(ClearType::All))?;
        }

        // Phase change → clean transition
        if self.last_phase != Some(s.phase) {
            self.back.cells.fill(Cell::INVALID);
            self.last_phase = Some(s.phase);
        }

        self.compose(s);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn compose(&mut self, s: &SessionState) {
        self.front.clear();
        self.compose_nav(s);

        let y = match s.phase {
            Phase::LengthGuess => self.compose_length(s, PANEL_ROW),
            Phase::Spelling => self.compose_spelling(s, PANEL_ROW),
            Phase::GameOver => self.compose_game_over(s, PANEL_ROW),
        };
        if let Some(r) = &s.reveal {
            self.compose_reveal(r, y + 1);
        }

        let legend_row = self.front.height.saturating_sub(FOOTER_ROWS);
        self.compose_legend(legend_row.max(y + 3));
        self.compose_message(s);

        match s.overlay {
            Some(Overlay::Help) => self.compose_help(),
            Some(Overlay::About) => self.compose_about(),
            None => {}
        }
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = TEXT;
        let mut last_bg = BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        queue!(self.writer, SetForegroundColor(TEXT), SetBackgroundColor(BASE_BG))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }
                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }

    // ── Navigation ──

    fn compose_nav(&mut self, s: &SessionState) {
        let bar = Color::Rgb { r: 36, g: 40, b: 52 };
        self.front.fill_row(NAV_ROW, ' ', TEXT, bar);
        self.front.put_str(1, NAV_ROW, "◆ Orthoplay", ACCENT, bar);

        let (icon, label, color) = if s.api_status.is_connected() {
            ("✓", "Connected", GOOD)
        } else {
            ("✗", "Disconnected", BAD)
        };
        let status = format!("{icon} {label}");
        let menu = "F1 How to Play   F2 About   API Status: ";
        let total = menu.chars().count() + status.chars().count() + 1;
        let x = self.front.width.saturating_sub(total);
        let x = self.front.put_str(x, NAV_ROW, menu, DIM, bar);
        self.front.put_str(x, NAV_ROW, &status, color, bar);

        self.front.fill_row(NAV_ROW + 1, '─', Color::Rgb { r: 60, g: 64, b: 80 }, Color::Reset);
    }

    // ── Length prompt ──

    /// Returns the first free row below the panel.
    fn compose_length(&mut self, s: &SessionState, top: usize) -> usize {
        let round = match &s.round {
            Some(r) => r,
            None => {
                self.front.put_center(top, "No word loaded", TEXT);
                self.front.put_center(top + 2, "Enter retry   Esc quit", DIM);
                return top + 3;
            }
        };
        self.front.put_center(top, "How many letters?", TEXT);
        if !round.clue.is_empty() {
            self.front.put_center(top + 1, &format!("Clue: {}", round.clue), DIM);
        }

        let opts = s.length.options();
        let buttons: Vec<String> = opts.iter().map(|n| format!("[ {n} letters ]")).collect();
        let width: usize = buttons.iter().map(|b| b.chars().count() + 2).sum();
        let mut x = self.front.width.saturating_sub(width) / 2;
        for (i, b) in buttons.iter().enumerate() {
            let (fg, bg) = if s.spelling.is_loading() {
                (DIM, Color::Reset)
            } else if i == s.length.cursor() {
                (Color::White, ACCENT)
            } else {
                (ACCENT, Color::Reset)
            };
            x = self.front.put_str(x, top + 3, b, fg, bg) + 2;
        }

        let mut y = top + 5;
        if let Some(fb) = s.length.feedback() {
            self.front.put_center(y, &fb.message, if fb.correct { GOOD } else { BAD });
            y += 1;
        }
        self.front.put_center(y + 1, "←/→ choose   1-9 pick   Enter guess   F3 give up", DIM);
        y + 2
    }

    // ── Spelling grid ──

    fn compose_spelling(&mut self, s: &SessionState, top: usize) -> usize {
        let game = &s.spelling;
        let n = s.word_length;
        self.front.put_center(top, &format!("Spell the word ({n} letters)"), TEXT);
        if let Some(round) = &s.round {
            if !round.clue.is_empty() {
                self.front.put_center(top + 1, &format!("Clue: {}", round.clue), DIM);
            }
        }
        let b = game.board();
        let stats = format!("Score: {}   Correct Words: {}   Level: {}", b.score, b.correct, b.level);
        self.front.put_center(top + 2, &stats, DIM);

        // Letter boxes
        let grid_y = top + 4;
        let x0 = self.front.width.saturating_sub(game.guess().len() * BOX_W) / 2;
        let blink_on = (s.anim_tick / 10) % 2 == 0;
        for (i, cell) in game.guess().cells().iter().enumerate() {
            let focused = i == game.guess().focus() && !game.is_loading();
            let border = if game.is_loading() {
                DIM
            } else if focused {
                ACCENT
            } else {
                Color::Rgb { r: 90, g: 95, b: 110 }
            };
            let caret = if focused && blink_on { '_' } else { ' ' };
            let letter = cell.map_or(caret, |l| l.as_char());
            let x = x0 + i * BOX_W;
            self.front.put_str(x, grid_y, "┌───┐", border, Color::Reset);
            self.front.put_str(x, grid_y + 1, "│", border, Color::Reset);
            self.front.set(x + 2, grid_y + 1, Cell::new(letter, TEXT, Color::Reset));
            self.front.put_str(x + 4, grid_y + 1, "│", border, Color::Reset);
            self.front.put_str(x, grid_y + 2, "└───┘", border, Color::Reset);
        }

        // Buttons
        let submit = if game.is_loading() { "[ Checking... ]" } else { "[ ➤ Submit ]" };
        let give_up = "[ Give Up (F3) ]";
        let width = submit.chars().count() + 4 + give_up.chars().count();
        let bx = self.front.width.saturating_sub(width) / 2;
        let by = grid_y + 4;
        let submit_fg = if game.can_submit() { Color::White } else { DIM };
        let submit_bg = if game.can_submit() { ACCENT } else { Color::Reset };
        let x = self.front.put_str(bx, by, submit, submit_fg, submit_bg) + 4;
        let give_fg = if game.is_loading() { DIM } else { WARN };
        self.front.put_str(x, by, give_up, give_fg, Color::Reset);

        self.front.put_center(by + 2, &format!("Enter all {n} letters and press Enter to submit (paste works too)"), DIM);
        by + 3
    }

    // ── Game over ──

    fn compose_game_over(&mut self, s: &SessionState, top: usize) -> usize {
        let b = s.spelling.board();
        self.front.put_center(top, "Game Over!", BAD);
        self.front.put_center(top + 2, &format!("Final Score: {}", b.score), TEXT);
        self.front.put_center(top + 3, &format!("Correct Words: {}", b.correct), TEXT);
        self.front.put_center(top + 4, &format!("Level Reached: {}", b.level), TEXT);

        let label = "[ Play Again: Enter ]";
        let x = self.front.width.saturating_sub(label.chars().count()) / 2;
        self.front.put_str(x, top + 6, label, Color::White, GOOD);
        self.front.put_center(top + 7, "Esc quit", DIM);
        top + 8
    }

    /// Answer next to the player's guess, guess letters colored by mark.
    fn compose_reveal(&mut self, r: &Reveal, y: usize) {
        let answer = format!("The word was {}", r.answer);
        self.front.put_center(y, &answer, TEXT);
        if r.guess.is_empty() {
            return;
        }
        let label = "Your guess: ";
        let width = label.chars().count() + r.guess.chars().count() * 2;
        let x = self.front.width.saturating_sub(width) / 2;
        let mut x = self.front.put_str(x, y + 1, label, DIM, Color::Reset);
        for (ch, mark) in r.guess.chars().zip(r.marks.iter()) {
            self.front.set(x, y + 1, Cell::new(ch, Color::Black, mark_color(*mark)));
            x += 2;
        }
    }

    // ── Legend ──

    fn compose_legend(&mut self, y: usize) {
        self.front.put_str(2, y, "ⓘ Color Guide", TEXT, Color::Reset);
        let col_w = (self.front.width.saturating_sub(4) / 3).max(20);
        for (i, mark) in LetterMark::ALL.iter().enumerate() {
            let x = 2 + i * col_w;
            self.front.set(x, y + 1, Cell::new(' ', Color::Black, mark_color(*mark)));
            self.front.set(x + 1, y + 1, Cell::new(' ', Color::Black, mark_color(*mark)));
            self.front.put_str(x + 3, y + 1, mark.label(), TEXT, Color::Reset);
            self.front.put_str(x + 3, y + 2, mark.hint(), DIM, Color::Reset);
        }
    }

    // ── Message bar ──

    fn compose_message(&mut self, s: &SessionState) {
        let row = self.front.height.saturating_sub(1);
        if s.message.is_empty() {
            self.front.put_str(1, row, "Esc quit   Ctrl+C quit", DIM, Color::Reset);
            return;
        }
        let bg = Color::Rgb { r: 200, g: 180, b: 50 };
        self.front.fill_row(row, ' ', Color::Black, bg);
        self.front.put_str(1, row, &format!("◈ {}", s.message), Color::Black, bg);
    }

    // ── Overlays ──

    fn compose_box(&mut self, title: &str, lines: &[&str]) {
        let bg = Color::Rgb { r: 40, g: 44, b: 58 };
        let w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(title.chars().count()) + 6;
        let h = lines.len() + 5;
        let x0 = self.front.width.saturating_sub(w) / 2;
        let y0 = self.front.height.saturating_sub(h) / 2;
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                self.front.set(x, y, Cell::new(' ', TEXT, bg));
            }
        }
        self.front.put_str(x0 + 3, y0 + 1, title, ACCENT, bg);
        for (i, l) in lines.iter().enumerate() {
            self.front.put_str(x0 + 3, y0 + 3 + i, l, TEXT, bg);
        }
        self.front.put_str(x0 + 3, y0 + h - 1, "Esc close", DIM, bg);
    }

    fn compose_help(&mut self) {
        self.compose_box("How to Play", &[
            "1. Guess how many letters the word has.",
            "   Pick with ←/→ and Enter, or press 1-9.",
            "2. Spell it: type letters, or paste the whole word.",
            "   Backspace / Delete erase, ←/→ Home End move.",
            "3. Press Enter when every box is filled.",
            "",
            "A wrong spelling ends the game.",
            "Every 3 correct words raise your level.",
            "F3 gives up the current word and shows the answer.",
        ]);
    }

    fn compose_about(&mut self) {
        self.compose_box("About", &[
            "Orthoplay: a spelling game for the terminal.",
            "Words come from the built-in list, or from the",
            "file named by `words_file` in config.toml.",
        ]);
    }
}
