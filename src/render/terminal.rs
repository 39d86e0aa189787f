//! In-place redraw of a block of lines on stderr

use std::io::{self, IsTerminal, Write};

use unicode_width::UnicodeWidthChar;

const CURSOR_HIDE: &str = "\x1b[?25l";
const CURSOR_SHOW: &str = "\x1b[?25h";
const ERASE_DOWN: &str = "\x1b[J";
const CURSOR_LEFT: &str = "\r";

/// Redraws the same screen region on every frame
///
/// On a terminal the previous frame is erased before the next is written, and
/// every row is cut to the terminal width so none of them wraps. When stderr
/// is redirected every frame that differs from the last is appended instead.
#[derive(Debug)]
pub struct Painter {
    ansi: bool,
    drawn_lines: usize,
    last_frame: Vec<String>,
}

impl Painter {
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            ansi: io::stderr().is_terminal(),
            drawn_lines: 0,
            last_frame: Vec::new(),
        }
    }

    /// Replace the previous frame with `lines`
    ///
    /// # Errors
    ///
    /// Returns any error from writing to stderr.
    pub fn paint(&mut self, lines: &[String]) -> io::Result<()> {
        if lines == self.last_frame.as_slice() {
            return Ok(());
        }

        let columns = if self.ansi { terminal_columns() } else { None };
        let mut stderr = io::stderr().lock();
        if self.ansi {
            self.rewind(&mut stderr)?;
            write!(stderr, "{CURSOR_HIDE}{ERASE_DOWN}")?;
        }
        for line in lines {
            match columns {
                Some(columns) => writeln!(stderr, "{}", fit_to_width(line, columns))?,
                None => writeln!(stderr, "{line}")?,
            }
        }
        stderr.flush()?;

        self.drawn_lines = lines.len();
        self.last_frame = lines.to_vec();
        Ok(())
    }

    /// Erase the last frame and restore the cursor
    ///
    /// # Errors
    ///
    /// Returns any error from writing to stderr.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.ansi {
            let mut stderr = io::stderr().lock();
            self.rewind(&mut stderr)?;
            write!(stderr, "{ERASE_DOWN}{CURSOR_SHOW}")?;
            stderr.flush()?;
        }
        self.drawn_lines = 0;
        self.last_frame.clear();
        Ok(())
    }

    fn rewind(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{CURSOR_LEFT}")?;
        if self.drawn_lines > 0 {
            write!(out, "\x1b[{}A", self.drawn_lines)?;
        }
        Ok(())
    }
}

impl Drop for Painter {
    fn drop(&mut self) {
        if self.ansi {
            let _ = write!(io::stderr(), "{CURSOR_SHOW}");
        }
    }
}

/// Usable columns, leaving the last one free so no terminal auto-wraps
fn terminal_columns() -> Option<usize> {
    crossterm::terminal::size()
        .ok()
        .map(|(columns, _)| usize::from(columns).saturating_sub(1))
        .filter(|columns| *columns > 0)
}

/// Cut `line` to at most `width` display columns
///
/// ANSI escape sequences take no room and are always kept, so an accent that
/// opens before the cut still gets its reset.
pub fn fit_to_width(line: &str, width: usize) -> String {
    let mut fitted = String::with_capacity(line.len());
    let mut used = 0usize;
    let mut full = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            fitted.push(ch);
            if chars.peek() == Some(&'[') {
                for c in chars.by_ref() {
                    fitted.push(c);
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }
        if full {
            continue;
        }

        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            full = true;
            continue;
        }
        fitted.push(ch);
        used += ch_width;
    }
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn short_rows_are_untouched() {
        assert_eq!(fit_to_width("Time left 1:30", 40), "Time left 1:30");
    }

    #[test]
    fn long_rows_are_cut_by_display_width() {
        let row = "█".repeat(50);
        let fitted = fit_to_width(&row, 20);
        assert_eq!(fitted.width(), 20);

        // wide glyphs never straddle the edge
        let fitted = fit_to_width("🔍🔍🔍", 5);
        assert_eq!(fitted, "🔍🔍");
    }

    #[test]
    fn escape_sequences_survive_the_cut() {
        let row = format!("\x1b[1;34m{}\x1b[0m", "x".repeat(30));
        let fitted = fit_to_width(&row, 10);
        assert_eq!(fitted, format!("\x1b[1;34m{}\x1b[0m", "x".repeat(10)));
    }
}
