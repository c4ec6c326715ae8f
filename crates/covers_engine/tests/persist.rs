use std::fs;

use covers_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("output").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
    assert_eq!(fs::read_dir(&new_dir).unwrap().count(), 0);
}

#[test]
fn atomic_write_replaces_existing_binary_content() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());

    let first = writer.write("cover.jpg.webp", [0u8, 159, 146, 150]).unwrap();
    assert_eq!(first.file_name().unwrap(), "cover.jpg.webp");
    assert_eq!(fs::read(&first).unwrap(), vec![0u8, 159, 146, 150]);

    let second = writer.write("cover.jpg.webp", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("cover.jpg.webp", "data");
    assert!(matches!(result, Err(PersistError::Io(_))));
    assert!(!file_path.with_file_name("cover.jpg.webp").exists());
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "x");
}

#[test]
fn writer_leaves_directory_checks_to_the_caller() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("output");

    let result = AtomicFileWriter::new(&missing).write("cover.jpg.webp", "data");
    assert!(matches!(result, Err(PersistError::Io(_))));
    assert!(!missing.exists());

    ensure_output_dir(&missing).unwrap();
    let written = AtomicFileWriter::new(&missing)
        .write("cover.jpg.webp", "data")
        .unwrap();
    assert_eq!(fs::read_dir(&missing).unwrap().count(), 1);
    assert_eq!(fs::read_to_string(written).unwrap(), "data");
}
