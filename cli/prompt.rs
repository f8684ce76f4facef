use colored::*;
use std::io::{self, BufRead, Write};

/// Shows `message` and reads one line. Only "y" or "yes" (any case) confirm;
/// anything else, including end of input, declines.
pub fn confirm_action<R: BufRead, W: Write>(
    message: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{}", message.yellow())?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        log::debug!("Confirmation input closed, treating as 'no'.");
        return Ok(false);
    }
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> bool {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        confirm_action("Proceed? (y/n) ", &mut reader, &mut out).unwrap()
    }

    #[test]
    fn accepts_y_and_yes_in_any_case() {
        assert!(ask("y\n"));
        assert!(ask("YES\n"));
        assert!(ask("  Yes  \r\n"));
    }

    #[test]
    fn everything_else_declines() {
        assert!(!ask("n\n"));
        assert!(!ask("yep\n"));
        assert!(!ask("\n"));
        assert!(!ask(""));
    }

    #[test]
    fn prompt_is_written_before_reading() {
        let mut reader = Cursor::new(b"y\n".to_vec());
        let mut out = Vec::new();
        confirm_action("Scan it? ", &mut reader, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Scan it? "));
    }
}
