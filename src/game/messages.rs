//! # Message Log
//!
//! Bounded, line-wrapped narrative log shown to the player.

use crate::config;
use crate::game::{palette, Colour};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single wrapped line of the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub colour: Colour,
}

/// Ordered log of coloured lines. Once `max_messages` lines are held, each
/// new line evicts the oldest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredLog")]
pub struct MessageLog {
    lines: VecDeque<Message>,
    max_messages: usize,
    wrap_width: usize,
}

/// Wire form of [`MessageLog`]; converting it re-applies the bounds.
#[derive(Deserialize)]
struct StoredLog {
    lines: VecDeque<Message>,
    max_messages: usize,
    wrap_width: usize,
}

impl From<StoredLog> for MessageLog {
    fn from(stored: StoredLog) -> Self {
        let max_messages = stored.max_messages.max(1);
        let mut lines = stored.lines;
        while lines.len() > max_messages {
            lines.pop_front();
        }
        Self {
            lines,
            max_messages,
            wrap_width: stored.wrap_width.max(1),
        }
    }
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new(max_messages: usize, wrap_width: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(max_messages),
            max_messages: max_messages.max(1),
            wrap_width: wrap_width.max(1),
        }
    }

    /// Wraps `text` and appends each resulting line.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::{palette, MessageLog};
    ///
    /// let mut log = MessageLog::new(2, 10);
    /// log.add("one two three four", palette::TEXT);
    /// let texts: Vec<&str> = log.iter().map(|m| m.text.as_str()).collect();
    /// assert_eq!(texts, vec!["one two", "three four"]);
    /// ```
    pub fn add(&mut self, text: &str, colour: Colour) {
        for line in wrap_text(text, self.wrap_width) {
            if self.lines.len() == self.max_messages {
                self.lines.pop_front();
            }
            self.lines.push_back(Message { text: line, colour });
        }
    }

    /// Appends a line in the default text colour.
    pub fn add_plain(&mut self, text: &str) {
        self.add(text, palette::TEXT);
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.lines.iter()
    }

    /// The most recently added line.
    pub fn last(&self) -> Option<&Message> {
        self.lines.back()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(config::MAX_MESSAGES, config::MSG_WRAP_WIDTH)
    }
}

/// Greedy word wrap. Words longer than `width` are split across lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
