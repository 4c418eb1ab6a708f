//! Terminal rendering of workflow output

use alarm_lib::{FileSystem, Reporter, Volume};
use colored::Colorize;
use std::io::Write;
use tabled::{settings::Style, Table, Tabled};

/// Row for the file-system table
#[derive(Tabled)]
struct FileSystemRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "File System ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
}

/// Row for the volume table
#[derive(Tabled)]
struct VolumeRow {
    #[tabled(rename = "Volume ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

/// Render file systems as a 1-based numbered table
pub fn file_system_table(file_systems: &[FileSystem]) -> String {
    let rows: Vec<FileSystemRow> = file_systems
        .iter()
        .enumerate()
        .map(|(i, fs)| FileSystemRow {
            index: i + 1,
            id: fs.file_system_id.clone(),
            name: fs.display_name().to_string(),
            kind: fs.file_system_type.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn volume_table(volumes: &[Volume]) -> String {
    let rows: Vec<VolumeRow> = volumes
        .iter()
        .map(|v| VolumeRow {
            id: v.volume_id.clone(),
            name: v.name.clone(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// [`Reporter`] that prints colored messages and tables
pub struct TerminalReporter<W: Write> {
    out: W,
}

impl TerminalReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }
}

impl<W: Write> Reporter for TerminalReporter<W> {
    fn file_systems(&mut self, file_systems: &[FileSystem]) {
        self.line(&format!("\n{}", "Available FSx File Systems:".bold()));
        self.line(&file_system_table(file_systems));
    }

    fn volumes(&mut self, volumes: &[Volume]) {
        self.line(&format!("\n{}", "Available Volumes:".bold()));
        self.line(&volume_table(volumes));
    }

    fn info(&mut self, message: &str) {
        self.line(&format!("{} {}", "ℹ".blue().bold(), message));
    }

    fn success(&mut self, message: &str) {
        self.line(&format!("{} {}", "✓".green().bold(), message));
    }

    fn warning(&mut self, message: &str) {
        self.line(&format!("{} {}", "⚠".yellow().bold(), message));
    }

    fn error(&mut self, message: &str) {
        self.line(&format!("{} {}", "✗".red().bold(), message));
    }
}
