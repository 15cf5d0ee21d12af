use std::fs;
use std::path::Path;

use export_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("dist").join("markdown");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();
    assert!(matches!(
        ensure_output_dir(&file_path),
        Err(PersistError::OutputDir { .. })
    ));
}

#[test]
fn atomic_write_creates_parents_and_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    let relative = Path::new("sentiment").join("daily").join("2025-03-14.md");

    let first = writer.write(&relative, "hello").unwrap();
    assert_eq!(first, temp.path().join(&relative));
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write(&relative, "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");

    let leftovers: Vec<_> = fs::read_dir(first.parent().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(leftovers.len(), 1, "temp files left behind: {leftovers:?}");
}

#[test]
fn paths_escaping_the_root_are_refused() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("out");
    let writer = AtomicFileWriter::new(root);

    let result = writer.write(Path::new("../escape.md"), "data");
    assert!(matches!(result, Err(PersistError::UnsafePath(_))));
    assert!(!temp.path().join("escape.md").exists());
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write(Path::new("doc.md"), "data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("doc.md").exists());
}

#[test]
fn rewrite_leaves_earlier_links_to_the_old_content() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    let target = writer.write(Path::new("doc.md"), "old").unwrap();
    let linked = temp.path().join("linked.md");
    fs::hard_link(&target, &linked).unwrap();

    writer.write(Path::new("doc.md"), "new").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    assert_eq!(fs::read_to_string(&linked).unwrap(), "old");
}

#[test]
fn writes_into_fresh_subdirectories_leave_only_documents() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    for day in ["2025-03-13.md", "2025-03-14.md", "2025-03-15.md"] {
        writer
            .write(&Path::new("sentiment").join("daily").join(day), day)
            .unwrap();
    }

    let mut names: Vec<String> = fs::read_dir(temp.path().join("sentiment").join("daily"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["2025-03-13.md", "2025-03-14.md", "2025-03-15.md"]);
}

#[test]
fn target_that_is_a_directory_fails_and_is_kept() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("doc.md")).unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    assert!(writer.write(Path::new("doc.md"), "data").is_err());
    assert!(temp.path().join("doc.md").is_dir());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}
