//! Interactive stdin prompts used when the category or target is not given
//! on the command line.

use crate::types::Category;
use anyhow::{bail, Result};
use std::io::{BufRead, Write};

/// Prompt the user for input with a label, returning the trimmed line.
fn prompt(reader: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<String> {
    Ok(prompt_raw(reader, out, label)?.trim().to_string())
}

/// Prompt for a line, stripping only the line terminator.
fn prompt_raw(reader: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<String> {
    write!(out, "{}: ", label)?;
    out.flush()?;
    let mut input = String::new();
    reader.read_line(&mut input)?;
    let line = input.strip_suffix('\n').unwrap_or(&input);
    let line = line.strip_suffix('\r').unwrap_or(line);
    Ok(line.to_string())
}

/// A target given on the command line, unless it is blank.
///
/// The value is passed through as typed; trimming only decides emptiness.
pub fn non_blank_target(target: Option<String>) -> Option<String> {
    target.filter(|t| !t.trim().is_empty())
}

/// Ask for a category until a valid one (or a menu number) is entered.
pub fn prompt_category(reader: &mut impl BufRead, out: &mut impl Write) -> Result<Category> {
    for (i, category) in Category::ALL.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, category)?;
    }

    loop {
        let input = prompt(reader, out, "Category")?;
        if input.is_empty() && at_eof(reader)? {
            bail!("No category selected");
        }

        let picked = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Category::ALL.get(i).copied())
            .or_else(|| Category::parse(&input));

        match picked {
            Some(category) => return Ok(category),
            None => writeln!(out, "  Unknown category '{}'", input)?,
        }
    }
}

/// Ask for a non-blank target string, returned as typed.
pub fn prompt_target(reader: &mut impl BufRead, out: &mut impl Write) -> Result<String> {
    loop {
        let input = prompt_raw(reader, out, "Target")?;
        if !input.trim().is_empty() {
            return Ok(input);
        }
        if at_eof(reader)? {
            bail!("No target entered");
        }
    }
}

fn at_eof(reader: &mut impl BufRead) -> Result<bool> {
    Ok(reader.fill_buf()?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn category_by_number_or_name() {
        let mut out = Vec::new();
        let mut input = Cursor::new("3\n");
        assert_eq!(prompt_category(&mut input, &mut out).unwrap(), Category::Domain);

        let mut input = Cursor::new("ip\n");
        assert_eq!(prompt_category(&mut input, &mut out).unwrap(), Category::Ip);
    }

    #[test]
    fn category_reprompts_on_bad_input() {
        let mut out = Vec::new();
        let mut input = Cursor::new("phone\n9\nemail\n");
        assert_eq!(prompt_category(&mut input, &mut out).unwrap(), Category::Email);

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Unknown category 'phone'"));
        assert!(shown.contains("Unknown category '9'"));
    }

    #[test]
    fn category_fails_at_eof() {
        let mut out = Vec::new();
        let mut input = Cursor::new("");
        assert!(prompt_category(&mut input, &mut out).is_err());
    }

    #[test]
    fn target_skips_blank_lines_and_keeps_spacing() {
        let mut out = Vec::new();
        let mut input = Cursor::new("\n   \r\n octocat \r\n");
        assert_eq!(prompt_target(&mut input, &mut out).unwrap(), " octocat ");
    }

    #[test]
    fn command_line_target_is_not_normalized() {
        assert_eq!(non_blank_target(Some(" a b ".into())), Some(" a b ".into()));
        assert_eq!(non_blank_target(Some("   ".into())), None);
        assert_eq!(non_blank_target(None), None);
    }

    #[test]
    fn target_fails_at_eof() {
        let mut out = Vec::new();
        let mut input = Cursor::new("\n");
        assert!(prompt_target(&mut input, &mut out).is_err());
    }
}
