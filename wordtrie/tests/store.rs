use std::fs;

use wordtrie::store::{DictionaryFile, Loaded, StatsFile};
use wordtrie::{Engine, FrequencyTracker, SessionLedger, Trie};

#[test]
fn load_missing_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let dict = DictionaryFile::new(dir.path().join("Dictionary.txt"));
    let mut trie = Trie::new();

    assert_eq!(Loaded::Missing, dict.load_into(&mut trie).unwrap());
    assert!(trie.is_empty());
}

#[test]
fn load_normalizes_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Dictionary.txt");
    fs::write(&path, "Apple\r\nbanana\n\ncherry pie\nDATE").unwrap();
    let mut trie = Trie::new();

    let loaded = DictionaryFile::new(&path).load_into(&mut trie).unwrap();
    assert_eq!(Loaded::Words(3), loaded);
    assert_eq!(
        vec!["apple", "banana", "date"],
        trie.words().collect::<Vec<_>>()
    );
}

#[test]
fn append_then_reload() {
    let dir = tempfile::tempdir().unwrap();
    let dict = DictionaryFile::new(dir.path().join("Dictionary.txt"));

    dict.append("kiwi").unwrap();
    dict.append("lime").unwrap();
    assert_eq!("kiwi\nlime\n", fs::read_to_string(dict.path()).unwrap());

    let mut trie = Trie::new();
    dict.load_into(&mut trie).unwrap();
    assert!(trie.contains_word("kiwi"));
    assert!(trie.contains_word("lime"));
}

#[test]
fn remove_keeps_other_lines_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Dictionary.txt");
    fs::write(&path, "alpha\r\nBeta\ngamma\nbeta\nDelta").unwrap();
    let dict = DictionaryFile::new(&path);

    assert_eq!(2, dict.remove("beta").unwrap());
    assert_eq!("alpha\r\ngamma\nDelta", fs::read_to_string(&path).unwrap());

    assert_eq!(0, dict.remove("omega").unwrap());
    assert_eq!("alpha\r\ngamma\nDelta", fs::read_to_string(&path).unwrap());

    // no temporary files left behind
    assert_eq!(1, fs::read_dir(dir.path()).unwrap().count());
}

#[test]
fn latin1_line_is_skipped_and_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Dictionary.txt");
    fs::write(&path, b"apple\ncaf\xe9\nbanana\n").unwrap();
    let dict = DictionaryFile::new(&path);
    let mut trie = Trie::new();

    assert_eq!(Loaded::Words(2), dict.load_into(&mut trie).unwrap());
    assert_eq!(vec!["apple", "banana"], trie.words().collect::<Vec<_>>());

    assert_eq!(1, dict.remove("banana").unwrap());
    assert_eq!(b"apple\ncaf\xe9\n".to_vec(), fs::read(&path).unwrap());
}

#[test]
fn remove_leaves_non_ascii_lines_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Dictionary.txt");
    fs::write(&path, "Straße\nstrasse\n\u{fb01}le\n").unwrap();
    let dict = DictionaryFile::new(&path);
    let mut trie = Trie::new();

    assert_eq!(Loaded::Words(1), dict.load_into(&mut trie).unwrap());
    assert_eq!(vec!["strasse"], trie.words().collect::<Vec<_>>());

    assert_eq!(1, dict.remove("strasse").unwrap());
    assert_eq!(
        "Straße\n\u{fb01}le\n",
        fs::read_to_string(&path).unwrap()
    );
    assert_eq!(0, dict.remove("file").unwrap());
}

#[test]
fn remove_from_missing_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let dict = DictionaryFile::new(dir.path().join("Dictionary.txt"));

    assert_eq!(0, dict.remove("alpha").unwrap());
    assert!(!dict.path().exists());
}

#[test]
fn stats_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let stats = StatsFile::new(dir.path().join("SearchStats.txt"));

    let mut freq = stats.load().unwrap();
    assert!(freq.is_empty());

    freq.record_query("ca");
    freq.record_query("do");
    freq.record_query("ca");
    freq.record_query("");
    stats.save(&freq).unwrap();
    assert_eq!("ca 2\ndo 1\n", fs::read_to_string(stats.path()).unwrap());

    let loaded = stats.load().unwrap();
    assert_eq!(2, loaded.count("ca"));
    assert_eq!(1, loaded.count("do"));
    assert_eq!(2, loaded.len());
}

#[test]
fn stats_save_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SearchStats.txt");
    fs::write(&path, "old 9\nstale 4\n").unwrap();
    let stats = StatsFile::new(&path);

    let mut freq = FrequencyTracker::new();
    freq.record_query("new");
    stats.save(&freq).unwrap();

    assert_eq!("new 1\n", fs::read_to_string(&path).unwrap());
}

#[test]
fn stats_skip_malformed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SearchStats.txt");
    fs::write(&path, "ca 3\nnot-a-count\nox 2\n").unwrap();

    let freq = StatsFile::new(&path).load().unwrap();
    assert_eq!(3, freq.count("ca"));
    assert_eq!(2, freq.count("ox"));
    assert_eq!(2, freq.len());
}

#[test]
fn delete_and_undo_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let dict = DictionaryFile::new(dir.path().join("Dictionary.txt"));
    for word in ["cat", "car", "cart"] {
        dict.append(word).unwrap();
    }

    let mut engine = Engine::new();
    dict.load_into(engine.trie_mut()).unwrap();
    let mut ledger = SessionLedger::new();

    assert!(engine.delete("car"));
    assert_eq!(1, dict.remove("car").unwrap());
    ledger.record_deleted("car");

    let restored = ledger.undo_delete(&mut engine).unwrap();
    dict.append(&restored).unwrap();

    assert!(engine.contains_word("car"));
    assert_eq!("cat\ncart\ncar\n", fs::read_to_string(dict.path()).unwrap());
    assert_eq!(vec!["car"], ledger.added().collect::<Vec<_>>());
}
