//! Interactive selection of a file system and its volumes

use std::collections::VecDeque;
use std::io;

use crate::error::SelectionError;
use crate::models::{FileSystem, Volume};
use crate::report::Reporter;

pub const FILE_SYSTEM_PROMPT: &str = "\nEnter the number of the file system you want to work with: ";

pub const VOLUME_PROMPT: &str = "\nEnter the VolumeIds or Names for which you want to create alarms (comma-separated), or press Enter to skip: ";

pub const INVALID_SELECTION: &str = "Invalid input. Please enter a valid number.";

pub const UNREADABLE_VOLUMES: &str = "Could not read the volume selection. No volumes selected.";

/// Source of operator input lines
pub trait LineSource {
    /// Show `prompt` and read one line. `Ok(None)` means the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

fn is_undecodable(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::InvalidData
}

/// Pre-scripted input, one entry per line
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

/// Parse a 1-based choice into a 0-based index within `count`
pub fn parse_choice(line: &str, count: usize) -> Option<usize> {
    let choice: usize = line.trim().parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

/// Show the file systems and read choices until one is valid
pub fn select_file_system<'a>(
    file_systems: &'a [FileSystem],
    input: &mut dyn LineSource,
    reporter: &mut dyn Reporter,
) -> Result<&'a FileSystem, SelectionError> {
    if file_systems.is_empty() {
        return Err(SelectionError::NothingToSelect);
    }

    reporter.file_systems(file_systems);

    loop {
        let line = match input.read_line(FILE_SYSTEM_PROMPT) {
            Ok(Some(line)) => line,
            Ok(None) => return Err(SelectionError::InputClosed),
            Err(e) if is_undecodable(&e) => {
                reporter.warning(INVALID_SELECTION);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match parse_choice(&line, file_systems.len()) {
            Some(index) => return Ok(&file_systems[index]),
            None => reporter.warning(INVALID_SELECTION),
        }
    }
}

/// Split a comma-separated line into trimmed, non-empty tokens
pub fn split_tokens(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Show the volumes and read the operator's volume tokens.
///
/// An empty line, exhausted input or an undecodable line selects nothing.
pub fn read_volume_tokens(
    volumes: &[Volume],
    input: &mut dyn LineSource,
    reporter: &mut dyn Reporter,
) -> Result<Vec<String>, SelectionError> {
    reporter.volumes(volumes);

    let line = match input.read_line(VOLUME_PROMPT) {
        Ok(line) => line.unwrap_or_default(),
        Err(e) if is_undecodable(&e) => {
            reporter.warning(UNREADABLE_VOLUMES);
            String::new()
        }
        Err(e) => return Err(e.into()),
    };
    Ok(split_tokens(&line))
}

/// Result of resolving one operator token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenResolution<'a> {
    Matched(&'a Volume),
    Unmatched(String),
}

/// Resolve each token against identifiers and names.
///
/// The first volume in list order matching either field wins; results keep
/// token order.
pub fn resolve_volumes<'a>(volumes: &'a [Volume], tokens: &[String]) -> Vec<TokenResolution<'a>> {
    tokens
        .iter()
        .map(|token| match volumes.iter().find(|v| v.matches(token)) {
            Some(volume) => TokenResolution::Matched(volume),
            None => TokenResolution::Unmatched(token.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;

    fn file_systems() -> Vec<FileSystem> {
        vec![
            FileSystem::new("fs-0aaa").with_tag("Name", "prod"),
            FileSystem::new("fs-0bbb"),
            FileSystem::new("fs-0ccc"),
        ]
    }

    /// Replays lines, failing the read for each `None` entry
    struct GarbledInput {
        lines: VecDeque<Option<&'static str>>,
        reads: usize,
    }

    impl GarbledInput {
        fn new(lines: &[Option<&'static str>]) -> Self {
            Self {
                lines: lines.iter().copied().collect(),
                reads: 0,
            }
        }
    }

    impl LineSource for GarbledInput {
        fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
            self.reads += 1;
            match self.lines.pop_front() {
                Some(Some(line)) => Ok(Some(line.to_string())),
                Some(None) => Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "stream did not contain valid UTF-8",
                )),
                None => Ok(None),
            }
        }
    }

    fn volumes() -> Vec<Volume> {
        vec![
            Volume::new("fsvol-1", "vol-a", "fs-0aaa"),
            Volume::new("fsvol-2", "vol-b", "fs-0aaa"),
        ]
    }

    #[test]
    fn test_parse_choice_bounds() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice(" 3 \n", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("-1", 3), None);
        assert_eq!(parse_choice("two", 3), None);
        assert_eq!(parse_choice("", 3), None);
        assert_eq!(parse_choice("1.5", 3), None);
    }

    #[test]
    fn test_valid_choice_does_not_reprompt() {
        let fss = file_systems();
        for n in 1..=fss.len() {
            let mut input = ScriptedInput::new([n.to_string()]);
            let mut reporter = RecordingReporter::new();

            let selected = select_file_system(&fss, &mut input, &mut reporter).unwrap();

            assert_eq!(selected.file_system_id, fss[n - 1].file_system_id);
            assert_eq!(input.prompts().len(), 1);
            assert!(reporter.warnings().is_empty());
        }
    }

    #[test]
    fn test_invalid_choices_reprompt_until_valid() {
        let fss = file_systems();
        let mut input = ScriptedInput::new(["abc", "0", "4", "", "2"]);
        let mut reporter = RecordingReporter::new();

        let selected = select_file_system(&fss, &mut input, &mut reporter).unwrap();

        assert_eq!(selected.file_system_id, "fs-0bbb");
        assert_eq!(input.prompts().len(), 5);
        assert_eq!(reporter.warnings(), vec![INVALID_SELECTION; 4]);
    }

    #[test]
    fn test_exhausted_input_stops_selection() {
        let fss = file_systems();
        let mut input = ScriptedInput::new(["nope"]);
        let mut reporter = RecordingReporter::new();

        let err = select_file_system(&fss, &mut input, &mut reporter).unwrap_err();

        assert!(matches!(err, SelectionError::InputClosed));
        assert_eq!(input.prompts().len(), 2);
    }

    #[test]
    fn test_undecodable_choice_reprompts() {
        let fss = file_systems();
        let mut input = GarbledInput::new(&[None, Some("3")]);
        let mut reporter = RecordingReporter::new();

        let selected = select_file_system(&fss, &mut input, &mut reporter).unwrap();

        assert_eq!(selected.file_system_id, "fs-0ccc");
        assert_eq!(input.reads, 2);
        assert_eq!(reporter.warnings(), vec![INVALID_SELECTION]);
    }

    #[test]
    fn test_other_read_errors_abort_selection() {
        struct Broken;
        impl LineSource for Broken {
            fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
        }

        let mut reporter = RecordingReporter::new();
        let err = select_file_system(&file_systems(), &mut Broken, &mut reporter).unwrap_err();

        assert!(matches!(err, SelectionError::Io(_)));
    }

    #[test]
    fn test_empty_list_is_not_selectable() {
        let mut input = ScriptedInput::new(["1"]);
        let mut reporter = RecordingReporter::new();

        let err = select_file_system(&[], &mut input, &mut reporter).unwrap_err();

        assert!(matches!(err, SelectionError::NothingToSelect));
        assert_eq!(input.remaining(), 1);
    }

    #[test]
    fn test_split_tokens_trims_and_drops_empty() {
        assert_eq!(
            split_tokens(" fsvol-1 , ,vol-b,, "),
            vec!["fsvol-1".to_string(), "vol-b".to_string()]
        );
        assert!(split_tokens("").is_empty());
        assert!(split_tokens(" , ,").is_empty());
    }

    #[test]
    fn test_read_volume_tokens_on_closed_input() {
        let mut input = ScriptedInput::new(Vec::<String>::new());
        let mut reporter = RecordingReporter::new();

        let tokens = read_volume_tokens(&volumes(), &mut input, &mut reporter).unwrap();

        assert!(tokens.is_empty());
        assert_eq!(input.prompts(), [VOLUME_PROMPT.to_string()]);
    }

    #[test]
    fn test_undecodable_volume_line_selects_nothing() {
        let mut input = GarbledInput::new(&[None]);
        let mut reporter = RecordingReporter::new();

        let tokens = read_volume_tokens(&volumes(), &mut input, &mut reporter).unwrap();

        assert!(tokens.is_empty());
        assert_eq!(input.reads, 1);
        assert_eq!(reporter.warnings(), vec![UNREADABLE_VOLUMES]);
    }

    #[test]
    fn test_resolve_by_id_or_name_and_report_unmatched() {
        let vols = volumes();
        let tokens = split_tokens("fsvol-1, bogus, vol-b");

        let resolved = resolve_volumes(&vols, &tokens);

        assert_eq!(
            resolved,
            vec![
                TokenResolution::Matched(&vols[0]),
                TokenResolution::Unmatched("bogus".to_string()),
                TokenResolution::Matched(&vols[1]),
            ]
        );
    }

    #[test]
    fn test_resolution_collision_picks_first_in_list_order() {
        // The second volume's name equals the first volume's id.
        let vols = vec![
            Volume::new("fsvol-1", "alpha", "fs-1"),
            Volume::new("fsvol-2", "fsvol-1", "fs-1"),
        ];

        let token = ["fsvol-1".to_string()];
        assert_eq!(
            resolve_volumes(&vols, &token),
            vec![TokenResolution::Matched(&vols[0])]
        );

        let reversed: Vec<Volume> = vols.iter().rev().cloned().collect();
        assert_eq!(
            resolve_volumes(&reversed, &token),
            vec![TokenResolution::Matched(&reversed[0])]
        );
        assert_eq!(reversed[0].volume_id, "fsvol-2");
    }
}
