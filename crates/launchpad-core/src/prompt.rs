//! Interactive prompt capability
//!
//! Core orchestration never talks to the terminal directly; it asks a
//! [`Prompter`]. The cliclack front end implements it for real sessions and
//! tests drive the same code with a scripted double.

use std::io;

/// An option in a selection prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub label: String,
    pub hint: String,
}

impl SelectItem {
    pub fn new(label: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hint: hint.into(),
        }
    }
}

/// Severity of a message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Step,
    Success,
    Warning,
    Error,
}

pub trait Prompter {
    /// Pick one of `items`; returns its index
    fn select(&mut self, message: &str, items: &[SelectItem]) -> io::Result<usize>;

    /// Free-text input with a default used when the answer is empty
    fn input(&mut self, message: &str, default: &str) -> io::Result<String>;

    /// Yes/no question
    fn confirm(&mut self, message: &str, initial: bool) -> io::Result<bool>;

    /// Show a message
    fn log(&mut self, level: LogLevel, message: &str) -> io::Result<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Answer {
        Select(usize),
        Input(String),
        Confirm(bool),
    }

    /// Replays canned answers in order and records every prompt and message
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedPrompter {
        answers: VecDeque<Answer>,
        pub(crate) asked: Vec<String>,
        pub(crate) logs: Vec<(LogLevel, String)>,
    }

    impl ScriptedPrompter {
        pub(crate) fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                ..Self::default()
            }
        }

        pub(crate) fn remaining(&self) -> usize {
            self.answers.len()
        }

        pub(crate) fn logged(&self, level: LogLevel, needle: &str) -> bool {
            self.logs
                .iter()
                .any(|(l, msg)| *l == level && msg.contains(needle))
        }

        fn next(&mut self, message: &str) -> io::Result<Answer> {
            self.asked.push(message.to_string());
            self.answers.pop_front().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("no scripted answer for prompt: {}", message),
                )
            })
        }
    }

    fn mismatch(message: &str, got: &Answer) -> io::Error {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unexpected answer {:?} for prompt: {}", got, message),
        )
    }

    impl Prompter for ScriptedPrompter {
        fn select(&mut self, message: &str, items: &[SelectItem]) -> io::Result<usize> {
            match self.next(message)? {
                Answer::Select(idx) if idx < items.len() => Ok(idx),
                other => Err(mismatch(message, &other)),
            }
        }

        fn input(&mut self, message: &str, default: &str) -> io::Result<String> {
            match self.next(message)? {
                Answer::Input(s) if s.is_empty() => Ok(default.to_string()),
                Answer::Input(s) => Ok(s),
                other => Err(mismatch(message, &other)),
            }
        }

        fn confirm(&mut self, message: &str, _initial: bool) -> io::Result<bool> {
            match self.next(message)? {
                Answer::Confirm(b) => Ok(b),
                other => Err(mismatch(message, &other)),
            }
        }

        fn log(&mut self, level: LogLevel, message: &str) -> io::Result<()> {
            self.logs.push((level, message.to_string()));
            Ok(())
        }
    }
}
