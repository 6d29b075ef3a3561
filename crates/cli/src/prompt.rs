use std::{
    fmt,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use chrono::NaiveDateTime;
use scandate_engine::{now_start, parse_start};
use scandate_runtime::DISPLAY_FORMAT;

/// Values offered when the user just presses enter.
#[derive(Debug, Clone)]
pub struct Defaults {
    /// Shown as a hint only; an empty answer means no folder was chosen.
    pub directory_hint: PathBuf,
    pub start: NaiveDateTime,
    pub increment_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub directory: PathBuf,
    pub start: NaiveDateTime,
    pub increment_minutes: i64,
}

/// Why the prompt ended without a full set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// The folder question was left empty.
    NoFolder,
    /// Input ended before every question was answered.
    InputEnded,
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stop::NoFolder => f.write_str("No folder selected. Exiting."),
            Stop::InputEnded => f.write_str("Input ended before all answers were given. Exiting."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted {
    Answered(Answers),
    Stopped(Stop),
}

/// Line-oriented stand-in for the folder/start/increment form.
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// `None` on end of input.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Ask for directory, start and increment.
    pub fn collect(&mut self, defaults: &Defaults) -> io::Result<Prompted> {
        let question = format!(
            "Folder with images to update (e.g. {})",
            defaults.directory_hint.display()
        );
        let directory = match self.ask(&question)? {
            Some(d) if d.is_empty() => return Ok(Prompted::Stopped(Stop::NoFolder)),
            Some(d) => PathBuf::from(d),
            None => return Ok(Prompted::Stopped(Stop::InputEnded)),
        };

        let default_start = defaults.start.format(DISPLAY_FORMAT).to_string();
        let question =
            format!("Start date (YYYY-MM-DD HH:MM:SS, \"now\" for current time) [{default_start}]");
        let start = loop {
            let Some(answer) = self.ask(&question)? else {
                return Ok(Prompted::Stopped(Stop::InputEnded));
            };
            if answer.is_empty() {
                break defaults.start;
            }
            if answer.eq_ignore_ascii_case("now") {
                break now_start();
            }
            match parse_start(&answer) {
                Ok(start) => break start,
                Err(e) => writeln!(self.output, "{e}")?,
            }
        };

        let question = format!("Minutes between file dates [{}]", defaults.increment_minutes);
        let increment_minutes = loop {
            let Some(answer) = self.ask(&question)? else {
                return Ok(Prompted::Stopped(Stop::InputEnded));
            };
            if answer.is_empty() {
                break defaults.increment_minutes;
            }
            match answer.parse::<i64>() {
                Ok(n) if n >= 0 => break n,
                _ => writeln!(self.output, "Enter a whole number of minutes, 0 or more")?,
            }
        };

        Ok(Prompted::Answered(Answers {
            directory,
            start,
            increment_minutes,
        }))
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
