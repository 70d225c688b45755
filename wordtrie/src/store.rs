//! Flat text files backing the dictionary and its search statistics.

use itertools::Itertools;
use nom::branch::alt;
use nom::bytes::complete::{take_till, take_till1};
use nom::character::complete::{char, line_ending, space0, space1, u64};
use nom::combinator::{eof, opt, recognize};
use nom::sequence::{delimited, pair, separated_pair, terminated};
use nom::IResult;
use nom_locate::LocatedSpan;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::frequency::FrequencyTracker;
use crate::normalize;
use crate::trie::Trie;

type Span<'a> = LocatedSpan<&'a str>;

/// Outcome of loading the dictionary file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loaded {
    /// There was no file yet. The trie was left as it was.
    Missing,
    /// This many lines were stored as words.
    Words(usize),
}

/// A word list with one word per line.
#[derive(Clone, Debug)]
pub struct DictionaryFile {
    path: PathBuf,
}

impl DictionaryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DictionaryFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts every line of the file into `trie`, after normalizing it.
    /// Lines that aren't UTF-8 are skipped.
    pub fn load_into(&self, trie: &mut Trie) -> Result<Loaded, StoreError> {
        let bytes = match read_optional(&self.path)? {
            Some(bytes) => bytes,
            None => return Ok(Loaded::Missing),
        };
        let mut loaded = 0;
        for (nr, raw) in bytes.split(|&b| b == b'\n').enumerate() {
            let line = match std::str::from_utf8(strip_line_end(raw)) {
                Ok(line) => line,
                Err(_) => {
                    debug!("{}:{}: not UTF-8, skipping", self.path.display(), nr + 1);
                    continue;
                }
            };
            let word = normalize(line);
            if trie.insert(&word) {
                loaded += 1;
            } else if !word.is_empty() {
                debug!("{}: not storing {:?}", self.path.display(), line);
            }
        }
        Ok(Loaded::Words(loaded))
    }

    /// Adds `word` as a new line at the end, creating the file if needed.
    pub fn append(&self, word: &str) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        file.write_all(word.as_bytes()).map_err(write_err)?;
        file.write_all(b"\n").map_err(write_err)?;
        Ok(())
    }

    /// Rewrites the file without the lines holding `word`, and returns how
    /// many lines were dropped. All other lines are kept exactly as they
    /// were, line endings included. The new contents replace the old file
    /// in one step, so an interrupted rewrite leaves the old file intact.
    pub fn remove(&self, word: &str) -> Result<usize, StoreError> {
        let bytes = match read_optional(&self.path)? {
            Some(bytes) => bytes,
            None => return Ok(0),
        };
        let mut kept = Vec::with_capacity(bytes.len());
        let mut removed = 0;
        for line in bytes.split_inclusive(|&b| b == b'\n') {
            let holds_word = std::str::from_utf8(strip_line_end(line))
                .map_or(false, |content| normalize(content) == word);
            if holds_word {
                removed += 1;
            } else {
                kept.extend_from_slice(line);
            }
        }
        if removed > 0 {
            replace_contents(&self.path, &kept)?;
        }
        Ok(removed)
    }
}

/// Search counts, one `word count` pair per line.
#[derive(Clone, Debug)]
pub struct StatsFile {
    path: PathBuf,
}

impl StatsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StatsFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved counts. A missing file means no searches yet.
    /// Lines that don't hold a `word count` pair are skipped.
    pub fn load(&self) -> Result<FrequencyTracker, StoreError> {
        match read_optional(&self.path)? {
            Some(bytes) => Ok(parse_stats(&self.path, &String::from_utf8_lossy(&bytes))),
            None => Ok(FrequencyTracker::new()),
        }
    }

    /// Replaces the file with the tracker's counts, in tracker order.
    pub fn save(&self, frequency: &FrequencyTracker) -> Result<(), StoreError> {
        let contents = frequency
            .entries()
            .iter()
            // An empty key can't be read back.
            .filter(|entry| !entry.key.is_empty())
            .map(|entry| format!("{} {}\n", entry.key, entry.count))
            .join("");
        replace_contents(&self.path, contents.as_bytes())
    }
}

/// Drops a trailing `\n` or `\r\n`.
fn strip_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("{} does not exist yet", path.display());
            Ok(None)
        }
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `contents` to a temporary file next to `path` and then moves it
/// over `path`.
fn replace_contents(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path).map_err(|source| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn stats_entry(s: Span) -> IResult<Span, (Span, u64)> {
    delimited(
        space0,
        separated_pair(take_till1(|c: char| c.is_whitespace()), space1, u64),
        pair(space0, alt((line_ending, eof))),
    )(s)
}

fn blank_line(s: Span) -> IResult<Span, Span> {
    recognize(terminated(space0, line_ending))(s)
}

fn rest_of_line(s: Span) -> IResult<Span, Span> {
    recognize(pair(take_till(|c: char| c == '\n'), opt(char('\n'))))(s)
}

fn parse_stats(path: &Path, text: &str) -> FrequencyTracker {
    let mut frequency = FrequencyTracker::new();
    let mut input = Span::new(text);
    while !input.fragment().is_empty() {
        if let Ok((rest, _)) = blank_line(input) {
            input = rest;
            continue;
        }
        match stats_entry(input) {
            Ok((rest, (key, count))) => {
                frequency.restore(key.fragment(), count);
                input = rest;
            }
            Err(_) => {
                warn!(
                    "{}:{}: skipping malformed search count",
                    path.display(),
                    input.location_line()
                );
                match rest_of_line(input) {
                    Ok((rest, _)) if rest.location_offset() > input.location_offset() => {
                        input = rest;
                    }
                    _ => break,
                }
            }
        }
    }
    frequency
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(text: &str) -> Vec<(String, u64)> {
        parse_stats(Path::new("test"), text)
            .entries()
            .iter()
            .map(|e| (e.key.clone(), e.count))
            .collect()
    }

    #[test]
    fn test_parse_stats() {
        assert_eq!(
            vec![("ca".to_string(), 3), ("dog".to_string(), 12)],
            parse("ca 3\ndog 12\n")
        );
        // no final newline, CRLF, extra spacing, blank lines
        assert_eq!(
            vec![("ca".to_string(), 3), ("dog".to_string(), 12)],
            parse("  ca\t3 \r\n\n\ndog 12")
        );
    }

    #[test]
    fn test_parse_stats_skips_bad_lines() {
        assert_eq!(
            vec![("ca".to_string(), 3), ("ox".to_string(), 1)],
            parse("ca 3\nbroken\ndog -4\nfish many\r\nox 1\n")
        );
        assert_eq!(Vec::<(String, u64)>::new(), parse("\r"));
    }

    #[test]
    fn test_strip_line_end() {
        assert_eq!(b"ca", strip_line_end(b"ca\r\n"));
        assert_eq!(b"ca", strip_line_end(b"ca\n"));
        assert_eq!(b"ca\r ", strip_line_end(b"ca\r "));
        assert_eq!(b"", strip_line_end(b""));
    }

    #[test]
    fn test_parse_stats_merges_repeats() {
        assert_eq!(vec![("ca".to_string(), 5)], parse("ca 3\nca 2\n"));
    }
}
