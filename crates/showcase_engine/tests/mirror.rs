use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use showcase_engine::{mirror_assets, ExcludeRule, MirrorError, MirrorJob};
use tempfile::TempDir;
use walkdir::WalkDir;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn files_under(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn mirrors_assets_and_skips_markdown() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("common_md");
    let destination = temp.path().join("public").join("md_assets");
    write(&source, "a.png", b"\x89PNG-a");
    write(&source, "notes.md", b"# notes");
    write(&source, "sub/b.jpg", b"jpeg-b");

    let summary = mirror_assets(&MirrorJob::new(&source, &destination)).unwrap();

    assert_eq!(files_under(&destination), set(&["a.png", "sub/b.jpg"]));
    assert_eq!(fs::read(destination.join("a.png")).unwrap(), b"\x89PNG-a");
    assert_eq!(fs::read(destination.join("sub/b.jpg")).unwrap(), b"jpeg-b");
    assert_eq!(summary.files_copied, 2);
    assert_eq!(summary.files_excluded, 1);
    assert_eq!(summary.bytes_copied, 12);
    assert!(summary.destination.ends_with("md_assets"));
}

#[test]
fn rerun_removes_stale_files() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("src");
    let destination = temp.path().join("dst");
    write(&source, "a.png", b"a");
    write(&destination, "old.png", b"stale");
    write(&destination, "gone/deep.gif", b"stale");

    mirror_assets(&MirrorJob::new(&source, &destination)).unwrap();

    assert_eq!(files_under(&destination), set(&["a.png"]));
    assert!(!destination.join("old.png").exists());
    assert!(!destination.join("gone").exists());
}

#[test]
fn updated_source_files_overwrite_previous_copies() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("src");
    let destination = temp.path().join("dst");
    write(&source, "logo.svg", b"v1");
    mirror_assets(&MirrorJob::new(&source, &destination)).unwrap();

    write(&source, "logo.svg", b"v2");
    mirror_assets(&MirrorJob::new(&source, &destination)).unwrap();

    assert_eq!(fs::read(destination.join("logo.svg")).unwrap(), b"v2");
}

#[test]
fn missing_source_fails_and_leaves_destination_untouched() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("does_not_exist");
    let destination = temp.path().join("dst");
    write(&destination, "keep.png", b"keep");

    let err = mirror_assets(&MirrorJob::new(&source, &destination)).unwrap_err();

    assert!(matches!(err, MirrorError::SourceUnavailable { .. }));
    assert_eq!(files_under(&destination), set(&["keep.png"]));
}

#[test]
fn missing_source_does_not_create_destination() {
    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("never");

    let result = mirror_assets(&MirrorJob::new(temp.path().join("nope"), &destination));

    assert!(result.is_err());
    assert!(!destination.exists());
}

#[test]
fn source_that_is_a_file_is_unavailable() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("file.txt");
    fs::write(&source, "x").unwrap();

    let err = mirror_assets(&MirrorJob::new(&source, temp.path().join("dst"))).unwrap_err();
    assert!(matches!(err, MirrorError::SourceUnavailable { .. }));
}

#[test]
fn nested_destination_is_rejected() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("src");
    write(&source, "a.png", b"a");

    let err = mirror_assets(&MirrorJob::new(&source, source.join("out"))).unwrap_err();
    assert!(matches!(err, MirrorError::OverlappingRoots { .. }));

    let err = mirror_assets(&MirrorJob::new(&source, temp.path())).unwrap_err();
    assert!(matches!(err, MirrorError::OverlappingRoots { .. }));
    assert!(source.join("a.png").exists());
}

#[test]
fn custom_exclusion_rule() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("src");
    let destination = temp.path().join("dst");
    write(&source, "guide.md", b"text");
    write(&source, "draft.psd", b"layers");
    write(&source, "final.png", b"png");

    let job = MirrorJob {
        exclude: ExcludeRule::Extensions(vec!["psd".into()]),
        ..MirrorJob::new(&source, &destination)
    };
    mirror_assets(&job).unwrap();

    assert_eq!(files_under(&destination), set(&["final.png", "guide.md"]));
}

#[test]
fn empty_source_yields_empty_destination() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("src");
    fs::create_dir_all(source.join("only_md")).unwrap();
    write(&source, "only_md/readme.md", b"#");
    let destination = temp.path().join("dst");

    let summary = mirror_assets(&MirrorJob::new(&source, &destination)).unwrap();

    assert!(destination.is_dir());
    assert!(files_under(&destination).is_empty());
    assert_eq!(summary.files_copied, 0);
}

#[test]
fn no_staging_directories_are_left_behind() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("src");
    write(&source, "a.png", b"a");

    mirror_assets(&MirrorJob::new(&source, temp.path().join("dst"))).unwrap();
    let _ = mirror_assets(&MirrorJob::new(temp.path().join("missing"), temp.path().join("dst")));

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with(".mirror-staging-"))
        .collect();
    assert!(leftovers.is_empty());
}

#[cfg(unix)]
#[test]
fn failure_while_copying_keeps_previous_destination() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("src");
    let destination = temp.path().join("dst");
    write(&source, "a.png", b"a");
    std::os::unix::fs::symlink(temp.path().join("missing.png"), source.join("z_broken.png"))
        .unwrap();
    write(&destination, "old.png", b"previous build");

    let err = mirror_assets(&MirrorJob::new(&source, &destination)).unwrap_err();

    assert!(matches!(err, MirrorError::Walk(_)), "{err:?}");
    assert_eq!(files_under(&destination), set(&["old.png"]));
    assert_eq!(
        fs::read(destination.join("old.png")).unwrap(),
        b"previous build"
    );
    let mut entries: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["dst".to_string(), "src".to_string()]);
}
