//! Interactive confirmation before a destructive run

use std::io::{self, BufRead, Write};

/// The only answer that lets a run proceed
pub const CONFIRMATION_WORD: &str = "yes";

/// Ask whether to delete `target`
///
/// Anything other than the word `yes` (any case, surrounding whitespace
/// ignored) declines, including end of input.
pub fn confirm(
    target: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    write!(
        output,
        "⚠️  This will delete pod {target}. Type '{CONFIRMATION_WORD}' to continue: "
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case(CONFIRMATION_WORD))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn answer(text: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed = confirm("default/web-1", &mut Cursor::new(text), &mut output).unwrap();
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn yes_proceeds() {
        let (confirmed, prompt) = answer("yes\n");
        assert!(confirmed);
        assert!(prompt.contains("default/web-1"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(answer("  yes  \n").0);
    }

    #[test]
    fn answer_is_case_insensitive() {
        for text in ["YES\n", "Yes\n", " yEs\n"] {
            assert!(answer(text).0, "{text:?} should proceed");
        }
    }

    #[test]
    fn other_answers_decline() {
        for text in ["y\n", "no\n", "yes please\n", "\n"] {
            assert!(!answer(text).0, "{text:?} should decline");
        }
    }

    #[test]
    fn end_of_input_declines() {
        assert!(!answer("").0);
    }
}
