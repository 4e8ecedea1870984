//! Line-based prompts that ask again until the answer is usable.
//!
//! Every read hits end of input sooner or later when stdin is piped; that
//! surfaces as `io::ErrorKind::UnexpectedEof` so the menu can treat it as
//! "exit".

use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use todolist::model::{parse_date, Hours};

const INVALID_NUMBER: &str = "Invalid number. Try again.";
const INVALID_DATE: &str = "Invalid date format. Use yyyy-MM-dd (example: 2025-12-31)";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Prints `message` and returns the next line without its line ending.
    /// Bytes that are not UTF-8 become U+FFFD.
    pub fn line(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        let text = String::from_utf8_lossy(&buf);
        Ok(text.trim_end_matches(['\n', '\r']).to_string())
    }

    pub fn int(&mut self, message: &str) -> io::Result<i64> {
        loop {
            match self.line(message)?.trim().parse() {
                Ok(n) => return Ok(n),
                Err(_) => writeln!(self.output, "{}", INVALID_NUMBER)?,
            }
        }
    }

    pub fn int_in_range(&mut self, message: &str, min: i64, max: i64) -> io::Result<i64> {
        loop {
            let n = self.int(message)?;
            if (min..=max).contains(&n) {
                return Ok(n);
            }
            writeln!(self.output, "Value must be between {} and {}", min, max)?;
        }
    }

    /// Estimated hours: any finite, non-negative number.
    pub fn hours(&mut self, message: &str) -> io::Result<Hours> {
        loop {
            match self.line(message)?.parse::<Hours>() {
                Ok(hours) if hours.get() >= 0.0 => return Ok(hours),
                _ => writeln!(self.output, "{}", INVALID_NUMBER)?,
            }
        }
    }

    pub fn date(&mut self, message: &str) -> io::Result<NaiveDate> {
        loop {
            match parse_date(self.line(message)?.trim()) {
                Ok(date) => return Ok(date),
                Err(_) => writeln!(self.output, "{}", INVALID_DATE)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output).unwrap()
    }

    #[test]
    fn line_strips_line_endings_only() {
        let mut p = prompter("  padded  \r\nnext\n");
        assert_eq!(p.line("Name: ").unwrap(), "  padded  ");
        assert_eq!(p.line("Name: ").unwrap(), "next");
        assert_eq!(output(p), "Name: Name: ");
    }

    #[test]
    fn line_survives_invalid_utf8() {
        let mut p = Prompter::new(Cursor::new(b"caf\xe9\r\nnext\n".to_vec()), Vec::new());
        assert_eq!(p.line("Name: ").unwrap(), "caf\u{FFFD}");
        assert_eq!(p.line("Name: ").unwrap(), "next");
    }

    #[test]
    fn int_asks_again_on_garbage() {
        let mut p = prompter("abc\n\n 7 \n");
        assert_eq!(p.int("Choose: ").unwrap(), 7);
        let out = output(p);
        assert_eq!(out.matches(INVALID_NUMBER).count(), 2);
    }

    #[test]
    fn int_in_range_reports_bounds() {
        let mut p = prompter("9\n0\n4\n");
        assert_eq!(p.int_in_range("Priority (1-5): ", 1, 5).unwrap(), 4);
        assert_eq!(output(p).matches("Value must be between 1 and 5").count(), 2);
    }

    #[test]
    fn hours_rejects_negative_and_nan() {
        let mut p = prompter("-1\nNaN\n2.5\n");
        assert_eq!(p.hours("Hours: ").unwrap().get(), 2.5);
        assert_eq!(output(p).matches(INVALID_NUMBER).count(), 2);
    }

    #[test]
    fn date_asks_until_valid() {
        let mut p = prompter("31/12/2025\n2025-3-1\n2025-02-30\n2025-12-31\n");
        assert_eq!(
            p.date("Due date (yyyy-MM-dd): ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
        assert_eq!(output(p).matches(INVALID_DATE).count(), 3);
    }

    #[test]
    fn end_of_input_is_unexpected_eof() {
        let mut p = prompter("abc\n");
        let err = p.int("Choose: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
