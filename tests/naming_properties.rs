use sync_guard::naming::{is_reserved_name, strip_temp_marker, RESERVED_NAMES};
use sync_guard::{
    is_allowed_filename, item_name, local_temp_path, remote_temp_path, SyncGuardError, TEMP_MARKER,
};

/// Parent part of a '/'-separated path (everything before the last '/').
fn parent(p: &str) -> Option<&str> {
    p.rfind('/').map(|i| &p[..i])
}

const SAMPLES: &[&str] = &[
    "/a/b/c.txt",
    "a\\b\\c.txt",
    "C:\\Users\\me\\Sync/photos\\2024/img.jpg",
    "relative/dir/file",
    "/root.txt",
    "trailing/",
    "back\\slash\\",
    "/",
    "\\",
    "",
    "plain",
    "~sg_already.tmp",
];

#[test]
fn item_name_examples() {
    assert_eq!(item_name("/a/b/c.txt"), "c.txt");
    assert_eq!(item_name("a\\b\\c.txt"), "c.txt");
    assert_eq!(item_name("C:\\Users\\me\\Sync/photos\\2024/img.jpg"), "img.jpg");
}

#[test]
fn item_name_without_separator_is_unchanged() {
    for p in ["plain", "", "a.b.c", "~sg_x", "CON"] {
        assert_eq!(item_name(p), p);
    }
}

#[test]
fn item_name_never_starts_with_separator() {
    for p in SAMPLES {
        let n = item_name(p);
        assert!(!n.starts_with('/') && !n.starts_with('\\'), "{p:?} -> {n:?}");
        assert!(!n.contains('/') && !n.contains('\\'), "{p:?} -> {n:?}");
    }
}

#[test]
fn remote_temp_path_shares_parent() {
    for p in SAMPLES.iter().filter(|p| p.contains('/')) {
        let t = remote_temp_path(p);
        assert_eq!(parent(&t), parent(p), "{p:?} -> {t:?}");
        assert!(item_name(&t).starts_with(TEMP_MARKER));
    }
}

#[test]
fn local_temp_path_shares_normalized_parent() {
    for p in SAMPLES.iter().filter(|p| p.contains('/') || p.contains('\\')) {
        let normalized = p.replace('\\', "/");
        let t = local_temp_path(p).unwrap();
        assert_eq!(parent(&t), parent(&normalized), "{p:?} -> {t:?}");
        assert!(!t.contains('\\'));
    }
}

#[test]
fn local_temp_path_example() {
    assert_eq!(
        local_temp_path("C:/sync/file.txt").unwrap(),
        format!("C:/sync/{TEMP_MARKER}file.txt")
    );
}

#[test]
fn local_temp_path_needs_a_parent() {
    assert!(matches!(
        local_temp_path("lonely.txt"),
        Err(SyncGuardError::NoParentDirectory(_))
    ));
}

#[test]
fn temp_paths_can_be_promoted_back() {
    let t = remote_temp_path("/site/img/logo.png");
    assert_eq!(strip_temp_marker(&t).as_deref(), Some("/site/img/logo.png"));
}

#[test]
fn filename_examples() {
    assert!(!is_allowed_filename("CON"));
    assert!(!is_allowed_filename("con"));
    assert!(is_allowed_filename("readme.txt"));
}

#[test]
fn every_reserved_name_is_rejected_in_any_case() {
    for name in RESERVED_NAMES {
        assert!(is_reserved_name(name));
        assert!(!is_allowed_filename(name));
        assert!(!is_allowed_filename(&name.to_ascii_lowercase()));
    }
}

#[test]
fn separators_are_never_allowed_in_names() {
    assert!(!is_allowed_filename("a/b"));
}
