//! Note persistence through the JSON slot file.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use emotion_jar::domain::{Note, Transformation};
use emotion_jar::infrastructure::{RandomSource, SystemRandom};
use emotion_jar::storage::{JsonFileStorage, NoteStore, NOTES_SLOT};

fn note(text: &str) -> Note {
    Note::new(text, Transformation::new(format!("{text}，我在。"), "—— 某人"))
}

fn open(dir: &std::path::Path) -> NoteStore {
    let storage = JsonFileStorage::in_dir(dir).unwrap();
    NoteStore::load(Box::new(storage), Arc::new(SystemRandom::new()))
}

#[test]
fn notes_survive_a_restart_in_order() {
    let dir = tempfile::tempdir().unwrap();

    let first = note("周一");
    let second = note("周二");
    {
        let mut store = open(dir.path());
        assert!(store.is_empty());
        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();
    }

    let store = open(dir.path());
    assert_eq!(store.notes(), &[second, first]);
}

#[test]
fn slot_file_uses_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    store.append(note("累")).unwrap();

    let path = dir.path().join(format!("{NOTES_SLOT}.json"));
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    let entry = &raw[0];
    for key in ["id", "originalText", "transformedText", "quote", "createdAt"] {
        assert!(entry.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn saving_the_same_note_twice_keeps_one_copy() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    let n = note("重复");

    assert!(store.append(n.clone()).unwrap());
    assert!(!store.append(n).unwrap());
    assert_eq!(open(dir.path()).len(), 1);
}

fn corrupt_backups(dir: &std::path::Path) -> Vec<Vec<u8>> {
    let prefix = format!("{NOTES_SLOT}.json.corrupt.");
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with(&prefix))
        .map(|e| std::fs::read(e.path()).unwrap())
        .collect()
}

#[test]
fn corrupt_file_starts_empty_and_is_kept_aside() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{NOTES_SLOT}.json"));
    std::fs::write(&path, "{ not json").unwrap();

    let mut store = open(dir.path());
    assert!(store.is_empty());
    assert_eq!(corrupt_backups(dir.path()), vec![b"{ not json".to_vec()]);

    store.append(note("新的开始")).unwrap();
    assert_eq!(open(dir.path()).len(), 1);
}

#[test]
fn undecodable_bytes_survive_the_next_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{NOTES_SLOT}.json"));
    let raw = b"[{\"id\":\"1\",\"originalText\":\"\xff\xfe\"}]".to_vec();
    std::fs::write(&path, &raw).unwrap();

    let mut store = open(dir.path());
    assert!(store.is_empty());
    store.append(note("之后写的")).unwrap();

    assert_eq!(corrupt_backups(dir.path()), vec![raw]);
    assert_eq!(open(dir.path()).len(), 1);
}

#[test]
fn unreadable_slot_is_never_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{NOTES_SLOT}.json"));
    std::fs::create_dir(&path).unwrap();

    let mut store = open(dir.path());
    assert!(store.is_empty());
    assert!(store.append(note("写不进去")).is_err());
    assert!(store.is_empty());
    assert!(path.is_dir());
}

#[test]
fn null_slot_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{NOTES_SLOT}.json")), "null").unwrap();
    assert!(open(dir.path()).is_empty());
}

#[test]
fn remove_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    let keep = note("留下");
    let drop = note("放下");
    store.append(keep.clone()).unwrap();
    store.append(drop.clone()).unwrap();

    assert_eq!(store.remove(&drop.id).unwrap(), Some(drop));
    assert_eq!(store.remove("missing").unwrap(), None);
    assert_eq!(open(dir.path()).notes(), &[keep]);
}

struct Cycle(AtomicUsize);

impl RandomSource for Cycle {
    fn index(&self, len: usize) -> usize {
        self.0.fetch_add(1, Ordering::Relaxed) % len
    }
}

#[test]
fn random_pick_is_always_a_stored_note() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::in_dir(dir.path()).unwrap();
    let mut store = NoteStore::load(Box::new(storage), Arc::new(Cycle(AtomicUsize::new(0))));
    assert!(store.pick_random().is_none());

    for text in ["一", "二", "三"] {
        store.append(note(text)).unwrap();
    }

    let ids: HashSet<_> = store.notes().iter().map(|n| n.id.clone()).collect();
    let mut seen = HashSet::new();
    for _ in 0..6 {
        let picked = store.pick_random().unwrap();
        assert!(ids.contains(&picked.id));
        seen.insert(picked.id.clone());
    }
    assert_eq!(seen, ids);
}

#[test]
fn system_random_pick_stays_in_the_jar() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    for text in ["a", "b", "c", "d"] {
        store.append(note(text)).unwrap();
    }
    for _ in 0..50 {
        let picked = store.pick_random().unwrap();
        assert!(store.contains(&picked.id));
    }
}
