use std::fs;

use covers_core::{Normalizer, UrlSet};
use covers_engine::{StoreError, UrlStore};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn url_set(names: &[&str]) -> UrlSet {
    let normalizer = Normalizer::default();
    names
        .iter()
        .map(|name| {
            normalizer
                .normalize(&format!("/sites/default/files/covers/{name}.jpg"))
                .unwrap()
        })
        .collect()
}

#[test]
fn save_then_load_reproduces_order() {
    let temp = TempDir::new().unwrap();
    let store = UrlStore::new(temp.path().join("urls.json"));
    let urls = url_set(&["c", "a", "b"]);

    let path = store.save(&urls).unwrap();
    assert_eq!(path, temp.path().join("urls.json"));

    let loaded = store.load().unwrap();
    let expected: Vec<String> = urls.iter().map(|url| url.to_string()).collect();
    assert_eq!(loaded, expected);
}

#[test]
fn saved_file_is_an_indented_json_array() {
    let temp = TempDir::new().unwrap();
    let store = UrlStore::new(temp.path().join("urls.json"));
    store.save(&url_set(&["jan24"])).unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    assert_eq!(
        text,
        "[\n    \"https://gameinformer.com/sites/default/files/styles/no_compression/public/covers/jan24.jpg.webp\"\n]\n"
    );
}

#[test]
fn save_overwrites_previous_contents() {
    let temp = TempDir::new().unwrap();
    let store = UrlStore::new(temp.path().join("urls.json"));
    store.save(&url_set(&["a", "b", "c"])).unwrap();
    store.save(&url_set(&["z"])).unwrap();

    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn empty_set_round_trips() {
    let temp = TempDir::new().unwrap();
    let store = UrlStore::new(temp.path().join("urls.json"));
    store.save(&UrlSet::new()).unwrap();

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn missing_and_malformed_stores_are_errors() {
    let temp = TempDir::new().unwrap();
    let store = UrlStore::new(temp.path().join("urls.json"));
    assert!(!store.exists());
    assert!(matches!(store.load(), Err(StoreError::Read(_))));

    fs::write(store.path(), "{\"not\": \"a list\"}").unwrap();
    assert!(matches!(store.load(), Err(StoreError::Json(_))));
}
