use crossterm::style::{Attribute, Color, ContentStyle, StyledContent};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use wordtrie::store::{DictionaryFile, Loaded, StatsFile};
use wordtrie::{normalize, Engine, SessionLedger, StoreError};

use crate::config::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Choice {
    AddWord,
    Suggest,
    ShowAll,
    RecentlyAdded,
    ShortestLongest,
    DeleteWord,
    RecentlyDeleted,
    UndoDelete,
    FrequentSearches,
    Exit,
}

const MENU: [(Choice, &str); 10] = [
    (Choice::AddWord, "Add a new word"),
    (Choice::Suggest, "Search by prefix (Auto-suggestions)"),
    (Choice::ShowAll, "Display all words"),
    (Choice::RecentlyAdded, "Show recently added words"),
    (Choice::ShortestLongest, "Show shortest & longest word"),
    (Choice::DeleteWord, "Delete a word"),
    (Choice::RecentlyDeleted, "Show recently deleted words"),
    (Choice::UndoDelete, "Undo last deleted word"),
    (Choice::FrequentSearches, "Show most frequently searched words"),
    (Choice::Exit, "Exit"),
];

impl Choice {
    /// Menu entries are numbered from 1.
    fn from_input(input: &str) -> Option<Self> {
        let nr: usize = input.trim().parse().ok()?;
        MENU.get(nr.checked_sub(1)?).map(|(choice, _)| *choice)
    }
}

#[derive(Clone, Copy, Debug)]
enum Tone {
    Title,
    Menu,
    Prompt,
    Heading,
    Section,
    Listing,
    Item,
    Removed,
    Success,
    Notice,
    Warning,
    Failure,
}

impl Tone {
    fn style(self) -> ContentStyle {
        let (color, bold) = match self {
            Tone::Title => (Color::DarkCyan, true),
            Tone::Menu => (Color::AnsiValue(208), false),
            Tone::Prompt => (Color::DarkGrey, false),
            Tone::Heading => (Color::DarkYellow, true),
            Tone::Section => (Color::DarkMagenta, false),
            Tone::Listing => (Color::Yellow, false),
            Tone::Item => (Color::DarkCyan, false),
            Tone::Removed => (Color::DarkRed, false),
            Tone::Success => (Color::DarkGreen, false),
            Tone::Notice => (Color::DarkYellow, false),
            Tone::Warning => (Color::Yellow, false),
            Tone::Failure => (Color::DarkRed, true),
        };
        let mut style = ContentStyle::new();
        style.foreground_color = Some(color);
        if bold {
            style.attributes.set(Attribute::Bold);
        }
        style
    }
}

#[derive(Clone, Copy, Debug)]
struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint<D: Display>(&self, tone: Tone, content: D) -> StyledContent<D> {
        if self.enabled {
            tone.style().apply(content)
        } else {
            ContentStyle::new().apply(content)
        }
    }
}

/// The interactive menu around the dictionary.
///
/// Reads commands from `input` and writes everything it shows to `output`.
/// Words are normalized here before they reach the engine.
#[derive(Debug)]
pub struct Shell<R, W> {
    input: R,
    output: W,
    engine: Engine,
    ledger: SessionLedger,
    dictionary: DictionaryFile,
    stats: StatsFile,
    rank_searches: bool,
    palette: Palette,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, config: &Config) -> Self {
        let ledger = match config.history_limit {
            Some(limit) => SessionLedger::with_limit(limit),
            None => SessionLedger::new(),
        };
        Shell {
            input,
            output,
            engine: Engine::new(),
            ledger,
            dictionary: DictionaryFile::new(&config.dictionary),
            stats: StatsFile::new(&config.stats),
            rank_searches: config.rank_searches,
            palette: Palette {
                enabled: config.color,
            },
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads the dictionary and the search counts. Problems with either
    /// file are reported and the shell starts without that file's data.
    pub fn load(&mut self) -> io::Result<()> {
        match self.dictionary.load_into(self.engine.trie_mut()) {
            Ok(Loaded::Words(count)) => {
                info!("loaded {} words from {}", count, self.dictionary.path().display());
                self.say(Tone::Success, "Dictionary loaded successfully!")?;
            }
            Ok(Loaded::Missing) => {
                warn!("{} not found", self.dictionary.path().display());
                self.say(
                    Tone::Warning,
                    "Warning: Dictionary file not found. Proceeding with an empty trie.",
                )?;
            }
            Err(err) => self.report(err)?,
        }
        match self.stats.load() {
            Ok(frequency) => *self.engine.frequency_mut() = frequency,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    /// Runs the menu until the user exits or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let line = match self.read_line()? {
                Some(line) => line,
                None => break,
            };
            match Choice::from_input(&line) {
                Some(Choice::AddWord) => self.add_word()?,
                Some(Choice::Suggest) => self.suggest()?,
                Some(Choice::ShowAll) => self.show_all()?,
                Some(Choice::RecentlyAdded) => self.show_recently_added()?,
                Some(Choice::ShortestLongest) => self.show_shortest_longest()?,
                Some(Choice::DeleteWord) => self.delete_word()?,
                Some(Choice::RecentlyDeleted) => self.show_recently_deleted()?,
                Some(Choice::UndoDelete) => self.undo_delete()?,
                Some(Choice::FrequentSearches) => self.show_frequent_searches()?,
                Some(Choice::Exit) => break,
                None => self.say(Tone::Failure, "Invalid choice! Please try again.")?,
            }
        }
        self.exit()
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        self.say(Tone::Title, "--- Auto-Suggest System ---")?;
        for (nr, (_, label)) in MENU.iter().enumerate() {
            let line = format!("{}. {}", nr + 1, label);
            self.say(Tone::Menu, line)?;
        }
        self.prompt("Enter your choice: ")
    }

    fn add_word(&mut self) -> io::Result<()> {
        let word = match self.ask_word("Enter word to add: ")? {
            Some(word) => word,
            None => return Ok(()),
        };
        if self.engine.contains_word(&word) {
            return self.say(
                Tone::Notice,
                format!("\"{}\" is already in the dictionary.", word),
            );
        }
        if !self.engine.insert(&word) {
            return self.say(
                Tone::Failure,
                format!("\"{}\" was not added: only the letters a-z can be stored.", word),
            );
        }
        info!("added {:?}", word);
        self.ledger.record_added(&word);
        if let Err(err) = self.dictionary.append(&word) {
            self.report(err)?;
        }
        self.say(Tone::Success, "Word added successfully!")
    }

    fn suggest(&mut self) -> io::Result<()> {
        let prefix = match self.ask_word("Enter prefix: ")? {
            Some(prefix) => prefix,
            None => return Ok(()),
        };
        let suggestions: Vec<String> = match self.engine.suggest(&prefix) {
            Some(words) => words.collect(),
            None => Vec::new(),
        };
        if suggestions.is_empty() {
            return self.say(Tone::Failure, "No suggestions found.");
        }
        self.say(Tone::Success, "Suggestions:")?;
        self.list(Tone::Item, suggestions)
    }

    fn show_all(&mut self) -> io::Result<()> {
        let words: Vec<String> = self.engine.words().collect();
        if words.is_empty() {
            return self.say(Tone::Notice, "The dictionary is empty.");
        }
        self.say(Tone::Listing, "All words in dictionary:")?;
        self.list(Tone::Item, words)
    }

    fn show_recently_added(&mut self) -> io::Result<()> {
        let words: Vec<String> = self.ledger.added().map(str::to_string).collect();
        if words.is_empty() {
            return self.say(Tone::Notice, "No words added during this session.");
        }
        self.say(Tone::Heading, "Recently Added Words (This Session):")?;
        self.list(Tone::Item, words)
    }

    fn show_shortest_longest(&mut self) -> io::Result<()> {
        let extremes = self.engine.extremal_words();
        if extremes.is_empty() {
            return self.say(Tone::Failure, "Trie is empty.");
        }
        self.say(Tone::Section, "Shortest word(s):")?;
        self.list(Tone::Item, extremes.shortest)?;
        self.say(Tone::Section, "Longest word(s):")?;
        self.list(Tone::Item, extremes.longest)
    }

    fn delete_word(&mut self) -> io::Result<()> {
        let word = match self.ask_word("Enter word to delete: ")? {
            Some(word) => word,
            None => return Ok(()),
        };
        if !self.engine.contains_word(&word) {
            return self.say(Tone::Failure, "Word not found in Trie.");
        }
        self.prompt(format!("Are you sure you want to delete \"{}\"? (y/n): ", word))?;
        let confirmed = self
            .read_line()?
            .map_or(false, |answer| answer.trim().eq_ignore_ascii_case("y"));
        if !confirmed {
            return self.say(Tone::Notice, "Deletion cancelled.");
        }

        self.engine.delete(&word);
        info!("deleted {:?}", word);
        self.ledger.record_deleted(&word);
        if let Err(err) = self.dictionary.remove(&word) {
            self.report(err)?;
        }
        self.say(Tone::Success, "Word deleted successfully.")
    }

    fn show_recently_deleted(&mut self) -> io::Result<()> {
        let words: Vec<String> = self.ledger.deleted().map(str::to_string).collect();
        if words.is_empty() {
            return self.say(Tone::Notice, "No words deleted during this session.");
        }
        self.say(Tone::Failure, "Recently Deleted Words (This Session):")?;
        self.list(Tone::Removed, words)
    }

    fn undo_delete(&mut self) -> io::Result<()> {
        let word = match self.ledger.undo_delete(&mut self.engine) {
            Some(word) => word,
            None => return self.say(Tone::Notice, "No deleted words to undo."),
        };
        if let Err(err) = self.dictionary.append(&word) {
            self.report(err)?;
        }
        self.say(
            Tone::Success,
            format!("Successfully restored \"{}\" to Trie and Dictionary.", word),
        )
    }

    fn show_frequent_searches(&mut self) -> io::Result<()> {
        let frequency = self.engine.frequency();
        let entries: Vec<String> = if self.rank_searches {
            frequency
                .ranked()
                .into_iter()
                .map(|e| format!("{} ({} times)", e.key, e.count))
                .collect()
        } else {
            frequency
                .entries()
                .iter()
                .map(|e| format!("{} ({} times)", e.key, e.count))
                .collect()
        };
        if entries.is_empty() {
            return self.say(Tone::Notice, "No search history found.");
        }
        self.say(Tone::Heading, "Most Frequently Searched Words:")?;
        self.list(Tone::Item, entries)
    }

    fn exit(&mut self) -> io::Result<()> {
        if let Err(err) = self.stats.save(self.engine.frequency()) {
            self.report(err)?;
        }
        self.say(Tone::Heading, "PROGRAM EXITED SUCCESSFULLY.")
    }

    /// Shows `question` and returns the normalized answer. Returns None if
    /// the answer was empty or the input ended.
    fn ask_word(&mut self, question: &str) -> io::Result<Option<String>> {
        self.prompt(question)?;
        let word = match self.read_line()? {
            Some(line) => normalize(&line),
            None => return Ok(None),
        };
        if word.is_empty() {
            self.say(Tone::Failure, "Nothing entered.")?;
            return Ok(None);
        }
        Ok(Some(word))
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn prompt(&mut self, text: impl Display) -> io::Result<()> {
        write!(self.output, "{}", self.palette.paint(Tone::Prompt, text))?;
        self.output.flush()
    }

    fn say(&mut self, tone: Tone, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", self.palette.paint(tone, text))
    }

    fn list(&mut self, tone: Tone, items: Vec<String>) -> io::Result<()> {
        for item in items {
            self.say(tone, format!(" - {}", item))?;
        }
        Ok(())
    }

    fn report(&mut self, err: StoreError) -> io::Result<()> {
        let err = anyhow::Error::new(err);
        warn!("{:#}", err);
        self.say(Tone::Warning, format!("Warning: {:#}", err))
    }
}
