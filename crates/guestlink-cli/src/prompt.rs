use clap::ValueEnum;
use guestlink_core::{Decision, Disambiguator, Match, PhoneChoice};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AmbiguityPolicy {
    /// Ask on the terminal
    Prompt,
    /// Skip every ambiguous name
    Skip,
    /// Take the best-ranked match
    First,
}

/// Asks which of several matches (and which of their phones) to invite.
pub struct TerminalDisambiguator<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalDisambiguator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn print_options(
        &mut self,
        name: &str,
        matches: &[Match],
        options: &[PhoneChoice],
    ) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Select contact for \"{name}\":")?;
        for (number, option) in options.iter().enumerate() {
            let matched = &matches[option.match_index];
            writeln!(
                self.output,
                "  [{}] {} ({}) - {}% match",
                number + 1,
                matched.name,
                option.phone,
                (matched.confidence * 100.0).round()
            )?;
        }
        writeln!(self.output, "  [s] Skip this invite")
    }
}

impl<R: BufRead, W: Write> Disambiguator for TerminalDisambiguator<R, W> {
    type Error = io::Error;

    fn disambiguate(&mut self, name: &str, matches: &[Match]) -> io::Result<Decision> {
        let options: Vec<PhoneChoice> = matches
            .iter()
            .enumerate()
            .flat_map(|(index, item)| {
                item.phones
                    .iter()
                    .map(move |phone| PhoneChoice::new(index, phone.clone()))
            })
            .collect();
        if options.is_empty() {
            return Ok(Decision::Decline);
        }

        self.print_options(name, matches, &options)?;
        loop {
            write!(self.output, "Choice (e.g. 1 or 1,3): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(Decision::Decline);
            }

            match parse_choice(&line, options.len()) {
                Ok(None) => return Ok(Decision::Decline),
                Ok(Some(numbers)) => {
                    let picked = numbers
                        .into_iter()
                        .map(|number| options[number - 1].clone())
                        .collect();
                    return Ok(Decision::Select(picked));
                }
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
    }
}

/// `None` means skip. Numbers are 1-based, deduplicated, in typed order.
fn parse_choice(line: &str, count: usize) -> Result<Option<Vec<usize>>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("s")
        || trimmed.eq_ignore_ascii_case("skip")
    {
        return Ok(None);
    }

    let mut numbers = Vec::new();
    for token in trimmed
        .split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        let number: usize = token
            .parse()
            .map_err(|_| format!("not a number: {token}"))?;
        if number == 0 || number > count {
            return Err(format!("choose between 1 and {count}"));
        }
        if !numbers.contains(&number) {
            numbers.push(number);
        }
    }
    if numbers.is_empty() {
        return Err("choose at least one option".to_string());
    }
    Ok(Some(numbers))
}
