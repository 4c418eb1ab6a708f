//! Operator-facing output seam
//!
//! The workflow describes what happened through [`Reporter`]; the CLI renders
//! it to the terminal, tests record it.

use crate::models::{FileSystem, Volume};

/// Sink for console messages shown to the operator
pub trait Reporter {
    /// Render the numbered file-system list
    fn file_systems(&mut self, file_systems: &[FileSystem]);

    /// Render the volumes of the selected file system
    fn volumes(&mut self, volumes: &[Volume]);

    fn info(&mut self, message: &str);

    fn success(&mut self, message: &str);

    fn warning(&mut self, message: &str);

    fn error(&mut self, message: &str);
}

/// A single recorded message
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    FileSystems(Vec<String>),
    Volumes(Vec<String>),
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

/// Reporter that keeps every message in memory
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub messages: Vec<Message>,
}

#[cfg(any(test, feature = "test-util"))]
impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Warning(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Error(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Success(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// True when any message of any level contains `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.position(needle).is_some()
    }

    /// Index of the first message containing `needle`
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.messages.iter().position(|m| match m {
            Message::FileSystems(items) | Message::Volumes(items) => {
                items.iter().any(|item| item.contains(needle))
            }
            Message::Info(text)
            | Message::Success(text)
            | Message::Warning(text)
            | Message::Error(text) => text.contains(needle),
        })
    }
}

#[cfg(any(test, feature = "test-util"))]
impl Reporter for RecordingReporter {
    fn file_systems(&mut self, file_systems: &[FileSystem]) {
        self.messages.push(Message::FileSystems(
            file_systems
                .iter()
                .map(|fs| fs.file_system_id.clone())
                .collect(),
        ));
    }

    fn volumes(&mut self, volumes: &[Volume]) {
        self.messages.push(Message::Volumes(
            volumes.iter().map(|v| v.volume_id.clone()).collect(),
        ));
    }

    fn info(&mut self, message: &str) {
        self.messages.push(Message::Info(message.to_string()));
    }

    fn success(&mut self, message: &str) {
        self.messages.push(Message::Success(message.to_string()));
    }

    fn warning(&mut self, message: &str) {
        self.messages.push(Message::Warning(message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.messages.push(Message::Error(message.to_string()));
    }
}
