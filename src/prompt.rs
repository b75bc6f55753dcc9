//! Line-based terminal prompts: numbered menus, text input and confirmation.
//!
//! [`Prompter`] is generic over its reader and writer so the menus can be
//! driven from in-memory buffers in tests.

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};
use std::str::FromStr;

/// Errors from interactive prompts.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("input closed before an answer was given")]
    Aborted,

    #[error("invalid {what}: {value}")]
    InvalidNumber { what: &'static str, value: String },

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// How a menu answer maps onto the listed items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Index into the item list
    Item(usize),
    /// Text matched several items
    Ambiguous(usize),
    NoMatch,
}

/// Resolve a menu answer: a 1-based number, or text contained in exactly one
/// label (case-insensitive). A number outside the menu is matched as text,
/// so "800" still finds "Kodak Portra 800".
pub fn resolve_choice(labels: &[String], answer: &str) -> Choice {
    let answer = answer.trim();
    if answer.is_empty() {
        return Choice::NoMatch;
    }

    if let Ok(n) = answer.parse::<usize>() {
        if (1..=labels.len()).contains(&n) {
            return Choice::Item(n - 1);
        }
    }

    let needle = answer.to_lowercase();
    let matches: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|(_, label)| label.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [] => Choice::NoMatch,
        [only] => Choice::Item(*only),
        many => {
            // An exact label match wins over substring hits.
            match many
                .iter()
                .find(|&&i| labels[i].to_lowercase() == needle)
            {
                Some(&i) => Choice::Item(i),
                None => Choice::Ambiguous(many.len()),
            }
        }
    }
}

/// Parse a trimmed numeric answer, naming the field in the error.
pub fn parse_number<T: FromStr>(what: &'static str, value: &str) -> Result<T, PromptError> {
    value
        .trim()
        .parse()
        .map_err(|_| PromptError::InvalidNumber {
            what,
            value: value.trim().to_string(),
        })
}

/// Prompts over a reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompter on the process's stdin/stdout.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer (tests read what was printed).
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line of output.
    pub fn say(&mut self, text: impl AsRef<str>) -> Result<(), PromptError> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    fn ask(&mut self, message: &str) -> Result<String, PromptError> {
        write!(self.output, "{} ", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Aborted);
        }
        Ok(line.trim().to_string())
    }

    /// Show a numbered menu and return the index of the chosen item.
    pub fn select(&mut self, title: &str, labels: &[String]) -> Result<usize, PromptError> {
        self.say(title)?;
        for (i, label) in labels.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {}", i + 1, label)?;
        }

        loop {
            let answer = self.ask(">")?;
            match resolve_choice(labels, &answer) {
                Choice::Item(i) => return Ok(i),
                Choice::Ambiguous(n) => {
                    self.say(format!("'{}' matches {} entries, be more specific.", answer, n))?
                }
                Choice::NoMatch => self.say(format!(
                    "Enter a number between 1 and {} or part of a name.",
                    labels.len()
                ))?,
            }
        }
    }

    /// Ask for a non-empty line of text.
    pub fn input(&mut self, message: &str) -> Result<String, PromptError> {
        loop {
            let answer = self.ask(message)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("A value is required.")?;
        }
    }

    /// Ask for a number. Unparseable input is an error, not a re-prompt.
    pub fn input_number<T: FromStr>(
        &mut self,
        message: &str,
        what: &'static str,
    ) -> Result<T, PromptError> {
        let answer = self.input(message)?;
        parse_number(what, &answer)
    }

    /// Ask a yes/no question. An empty answer takes `default`.
    pub fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.ask(&format!("{} {}", message, hint))?;
            match answer.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer y or n.")?,
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

    fn labels() -> Vec<String> {
        vec![
            "Contax T3 (Carl Zeiss Sonnar T 35mm f/2.8)".to_string(),
            "Canon 7E (interchangeable)".to_string(),
            "Canon 7".to_string(),
            "Other (manual entry)".to_string(),
        ]
    }

    #[test]
    fn test_resolve_choice_by_number() {
        assert_eq!(resolve_choice(&labels(), "1"), Choice::Item(0));
        assert_eq!(resolve_choice(&labels(), " 4 "), Choice::Item(3));
        assert_eq!(resolve_choice(&labels(), "0"), Choice::NoMatch);
        assert_eq!(resolve_choice(&labels(), "9"), Choice::NoMatch);
    }

    #[test]
    fn test_resolve_choice_out_of_range_number_matches_text() {
        let films = vec![
            "Kodak Gold 200 (ISO 200, 35mm)".to_string(),
            "Kodak Portra 400 (ISO 400, 35mm)".to_string(),
            "Kodak Portra 800 (ISO 800, 35mm)".to_string(),
            "Other (manual entry)".to_string(),
        ];
        assert_eq!(resolve_choice(&films, "800"), Choice::Item(2));
        assert_eq!(resolve_choice(&films, "400"), Choice::Item(1));
        // In range, so still an index.
        assert_eq!(resolve_choice(&films, "2"), Choice::Item(1));
        assert_eq!(resolve_choice(&films, "35"), Choice::Ambiguous(3));
        assert_eq!(resolve_choice(&films, "1600"), Choice::NoMatch);
    }

    #[test]
    fn test_select_film_by_iso() {
        let films = vec![
            "Kodak Gold 200 (ISO 200, 35mm)".to_string(),
            "Kodak Portra 800 (ISO 800, 35mm)".to_string(),
        ];
        let mut p = prompter("800\n");
        assert_eq!(p.select("Select Film Stock:", &films).unwrap(), 1);
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(!out.contains("Enter a number"));
    }

    #[test]
    fn test_resolve_choice_by_text() {
        assert_eq!(resolve_choice(&labels(), "contax"), Choice::Item(0));
        assert_eq!(resolve_choice(&labels(), "MANUAL"), Choice::Item(3));
        assert_eq!(resolve_choice(&labels(), "canon"), Choice::Ambiguous(2));
        assert_eq!(resolve_choice(&labels(), "canon 7"), Choice::Item(2));
        assert_eq!(resolve_choice(&labels(), "leica"), Choice::NoMatch);
        assert_eq!(resolve_choice(&labels(), ""), Choice::NoMatch);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<u32>("ISO value", " 400 ").unwrap(), 400);
        assert_eq!(parse_number::<f64>("aperture", "2.8").unwrap(), 2.8);

        let err = parse_number::<u32>("focal length", "fifty").unwrap_err();
        assert_eq!(err.to_string(), "invalid focal length: fifty");
    }

    #[test]
    fn test_select_reprompts_until_valid() {
        let mut p = prompter("9\ncanon\n2\n");
        let idx = p.select("Select Camera:", &labels()).unwrap();
        assert_eq!(idx, 1);

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("   1) Contax T3"));
        assert!(out.contains("between 1 and 4"));
        assert!(out.contains("matches 2 entries"));
    }

    #[test]
    fn test_select_eof_aborts() {
        let mut p = prompter("");
        assert!(matches!(
            p.select("Select Camera:", &labels()),
            Err(PromptError::Aborted)
        ));
    }

    #[test]
    fn test_input_requires_value() {
        let mut p = prompter("\n  \nNikon\n");
        assert_eq!(p.input("Enter camera make:").unwrap(), "Nikon");
    }

    #[test]
    fn test_input_number_invalid() {
        let mut p = prompter("f2\n");
        let err = p
            .input_number::<f64>("Enter max aperture (f-number):", "aperture")
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidNumber { what: "aperture", .. }));
    }

    #[test]
    fn test_confirm() {
        assert!(!prompter("\n").confirm("Continue?", false).unwrap());
        assert!(prompter("\n").confirm("Continue?", true).unwrap());
        assert!(prompter("YES\n").confirm("Continue?", false).unwrap());
        assert!(!prompter("maybe\nn\n").confirm("Continue?", true).unwrap());
        assert!(matches!(
            prompter("").confirm("Continue?", false),
            Err(PromptError::Aborted)
        ));
    }
}
