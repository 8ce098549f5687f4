//! Escape decisions over the reference mount layout, in both anchor spellings.
use linkjail_core::fixtures::{Anchor, ESCAPE_CASES, reference_checker};
use linkjail_core::utils::logging::init_test_logging;
use linkjail_core::{EscapeChecker, escape_function};

fn relative() -> impl Fn(&str, &str) -> bool {
    escape_function(["./a/b", "./a/b/g/1", "./a/b/g/a/2", "./a/b/g/a/3"]).unwrap()
}

fn absolute() -> impl Fn(&str, &str) -> bool {
    escape_function(["/a/b", "/a/b/g/1", "/a/b/g/a/2", "/a/b/g/a/3"]).unwrap()
}

#[test]
fn test_relative_top_level_moves() {
    init_test_logging();
    let is_escape = relative();
    assert!(is_escape("./a/b/l", "./a/c/boop"));
    assert!(is_escape("./a/b", "./a/c/boop"));
    assert!(is_escape("./a/b", "./a"));
    assert!(!is_escape("./a/c", "./a/c/boop"));
    assert!(!is_escape("./a/b/l", "./a/b/f"));
}

#[test]
fn test_absolute_top_level_moves() {
    let is_escape = absolute();
    assert!(is_escape("/a/b/l", "/a/c/boop"));
    assert!(is_escape("/a/b", "/a/c/boop"));
    assert!(is_escape("/a/b", "/a"));
    assert!(!is_escape("/a/c", "/a/c/boop"));
    assert!(!is_escape("/a/b/l", "/a/b/f"));
}

#[test]
fn test_unrelated_target_always_escapes() {
    let is_escape = absolute();
    for from in [
        "/a/b/g/1",
        "/a/b/g/1/foo",
        "/a/b/g/h",
        "/a/b/g/h/i",
        "/a/b/g/a/2",
        "/a/b/g/a/2/foo",
        "/a/b/g/a/3",
        "/a/b/g/a/3/foo",
        "/a/b/g/a/h",
        "/a/b/g/a/h/i",
    ] {
        assert!(is_escape(from, "/some/path"), "{from} -> /some/path");
    }
}

#[test]
fn test_outer_mount_only_reachable_from_unmounted_subtrees() {
    let is_escape = relative();
    for to in ["./a/b", "./a/b/c"] {
        assert!(is_escape("./a/b/g/1", to));
        assert!(is_escape("./a/b/g/1/foo", to));
        assert!(!is_escape("./a/b/g/h", to));
        assert!(!is_escape("./a/b/g/h/i", to));
        assert!(is_escape("./a/b/g/a/2", to));
        assert!(is_escape("./a/b/g/a/2/foo", to));
        assert!(is_escape("./a/b/g/a/3", to));
        assert!(is_escape("./a/b/g/a/3/foo", to));
        assert!(!is_escape("./a/b/g/a/h", to));
        assert!(!is_escape("./a/b/g/a/h/i", to));
    }
}

#[test]
fn test_full_table_in_both_anchor_forms() {
    for anchor in Anchor::ALL {
        let checker = reference_checker(anchor).unwrap();
        for case in ESCAPE_CASES {
            let from = anchor.apply(case.from);
            let to = anchor.apply(case.to);
            assert_eq!(
                checker.is_escape_str(&from, &to).unwrap(),
                case.escape,
                "{from} -> {to}"
            );
        }
    }
}

#[test]
fn test_mixed_anchors_agree() {
    // Boundaries registered relative, queried absolute.
    let checker = EscapeChecker::from_strs(["./a/b", "./a/b/g/1"]).unwrap();
    assert!(checker.is_escape_str("/a/b/g/1/x", "./a/b").unwrap());
    assert!(!checker.is_escape_str("a/b/g/h", "/a/b/c").unwrap());
}
