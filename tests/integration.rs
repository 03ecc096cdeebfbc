//! Integration tests for dirx


use harness::{TestTree, line_of, run_dirx};

fn sample_tree() -> TestTree {
    let tree = TestTree::new();
    tree.add_file("a.txt", 10);
    tree.add_file("b.txt", 20);
    tree.add_file("sub/c.txt", 5);
    tree
}

#[test]
fn test_basic_listing() {
    let tree = sample_tree();

    let (stdout, stderr, success) = run_dirx(tree.path(), &[]);
    assert!(success, "dirx should succeed: {}", stderr);
    assert!(stdout.contains("a.txt"), "should show a.txt: {}", stdout);
    assert!(stdout.contains("b.txt"), "should show b.txt");
    assert!(stdout.contains("<DIR>"), "should mark sub as a directory");
    assert!(!stdout.contains("c.txt"), "should not descend without -s");
}

#[test]
fn test_directories_listed_first_by_default() {
    let tree = sample_tree();

    let (stdout, _stderr, success) = run_dirx(tree.path(), &[]);
    assert!(success);
    let sub = line_of(&stdout, " sub").expect("sub listed");
    let a = line_of(&stdout, "a.txt").expect("a.txt listed");
    assert!(sub < a, "directory should precede files: {}", stdout);
}

#[test]
fn test_recursive_pattern_totals() {
    let tree = sample_tree();

    let (stdout, stderr, success) = run_dirx(tree.path(), &["*.txt", "-s"]);
    assert!(success, "dirx should succeed: {}", stderr);

    let a = line_of(&stdout, "a.txt").expect("a.txt listed");
    let b = line_of(&stdout, "b.txt").expect("b.txt listed");
    let summary = line_of(&stdout, "2 Files 30 (30 bytes)").expect("level summary");
    let c = line_of(&stdout, "c.txt").expect("c.txt listed");
    let sub_summary = line_of(&stdout, "Only one file in").expect("sub summary");
    let total = line_of(&stdout, "File(s)").expect("grand total");

    assert!(a < b && b < summary && summary < c && c < sub_summary && sub_summary < total);
    assert!(
        stdout.contains("    3 File(s)              35 bytes total"),
        "grand total line: {}",
        stdout
    );
    assert!(!stdout.contains("<DIR>"), "sub does not match *.txt: {}", stdout);
}

#[test]
fn test_hidden_excluded_by_default_but_shown_with_star() {
    let tree = sample_tree();
    tree.add_file(".secret", 3);

    let (stdout, _stderr, success) = run_dirx(tree.path(), &[]);
    assert!(success);
    assert!(!stdout.contains(".secret"), "hidden file should be excluded: {}", stdout);

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["*"]);
    assert!(success);
    assert!(stdout.contains(".secret"), "* should include hidden: {}", stdout);

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["*", "-a", "no-hidden"]);
    assert!(success);
    assert!(!stdout.contains(".secret"));
}

#[test]
fn test_hidden_only() {
    let tree = sample_tree();
    tree.add_file(".secret", 3);

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["-b", "-a", "hidden"]);
    assert!(success);
    assert_eq!(stdout.lines().next(), Some(".secret"), "{}", stdout);
    assert!(!stdout.contains("a.txt"));
}

#[test]
fn test_bare_listing() {
    let tree = sample_tree();

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["-b", "-o", "name"]);
    assert!(success);
    let names: Vec<&str> = stdout.lines().take(3).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "[sub]"]);
    assert!(!stdout.contains("bytes free"), "bare output has no free-space line");
}

#[test]
fn test_bare_quotes_names_with_spaces() {
    let tree = TestTree::new();
    tree.add_file("my file.txt", 1);
    tree.add_file("plain.txt", 1);

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["-q", "-o", "name"]);
    assert!(success);
    let names: Vec<&str> = stdout.lines().take(2).collect();
    assert_eq!(names, vec!["\"my file.txt\"", "plain.txt"]);
}

#[test]
fn test_bare_recursive_lists_files_only() {
    let tree = sample_tree();

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["-b", "-s"]);
    assert!(success);
    assert!(!stdout.contains("[sub]"), "bare recursion drops directories: {}", stdout);
    assert!(stdout.contains("c.txt"));
}

#[test]
fn test_sort_by_size() {
    let tree = TestTree::new();
    tree.add_file("big.dat", 300);
    tree.add_file("small.dat", 1);
    tree.add_file("mid.dat", 50);

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["-b", "-o", "size"]);
    assert!(success);
    let names: Vec<&str> = stdout.lines().take(3).collect();
    assert_eq!(names, vec!["small.dat", "mid.dat", "big.dat"]);
}

#[test]
fn test_sort_by_extension_reversed() {
    let tree = TestTree::new();
    tree.add_file("one.a", 1);
    tree.add_file("two.c", 1);
    tree.add_file("three.b", 1);

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["-b", "-o", "ext-rev"]);
    assert!(success);
    let names: Vec<&str> = stdout.lines().take(3).collect();
    assert_eq!(names, vec!["two.c", "three.b", "one.a"]);
}

#[test]
fn test_time_sort_wins_over_name() {
    let tree = TestTree::new();
    tree.add_file("a.log", 1);
    tree.add_file("b.log", 1);
    tree.set_age("a.log", std::time::Duration::from_secs(60));
    tree.set_age("b.log", std::time::Duration::from_secs(3600));

    let (stdout, _stderr, success) =
        run_dirx(tree.path(), &["-b", "-o", "name", "-o", "date"]);
    assert!(success);
    let names: Vec<&str> = stdout.lines().take(2).collect();
    assert_eq!(names, vec!["b.log", "a.log"]);
}

#[test]
fn test_wide_listing() {
    let tree = sample_tree();

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["-w", "-o", "name"]);
    assert!(success);
    let first = stdout.lines().next().expect("one row");
    assert!(first.starts_with("a.txt"), "{}", first);
    assert!(first.contains("b.txt"));
    assert!(first.contains("[sub]"));
}

#[test]
fn test_unix_long_listing() {
    let tree = TestTree::new();
    tree.add_file("file.txt", 7);

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["-u"]);
    assert!(success);
    let line = line_of(&stdout, "file.txt")
        .and_then(|i| stdout.lines().nth(i))
        .expect("file listed");
    assert!(line.starts_with("-rw"), "symbolic mode: {}", line);
}

#[test]
fn test_no_comma_option() {
    let tree = TestTree::new();
    tree.add_file("large.bin", 12_345);

    let (stdout, _stderr, success) = run_dirx(tree.path(), &[]);
    assert!(success);
    assert!(stdout.contains("12,345 large.bin"), "{}", stdout);

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["-c"]);
    assert!(success);
    assert!(stdout.contains("12345 large.bin"), "{}", stdout);
}

#[test]
fn test_directories_only() {
    let tree = sample_tree();
    tree.add_dir("other");

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["-b", "-a", "dirs"]);
    assert!(success);
    let names: Vec<&str> = stdout.lines().take(2).collect();
    assert_eq!(names, vec!["other", "sub"], "no brackets in dirs-only mode");
    assert!(!stdout.contains("a.txt"));
}

#[test]
fn test_conflicting_attribute_options_fail() {
    let tree = sample_tree();

    let (_stdout, stderr, success) =
        run_dirx(tree.path(), &["-a", "readonly", "-a", "no-readonly"]);
    assert!(!success);
    assert!(stderr.contains("dirx:"), "{}", stderr);
}

#[test]
fn test_star_with_other_pattern_fails() {
    let tree = sample_tree();

    let (_stdout, stderr, success) = run_dirx(tree.path(), &["*", "*.txt"]);
    assert!(!success);
    assert!(stderr.contains("cannot combine"), "{}", stderr);
}

#[test]
fn test_no_match_reports_no_file_found() {
    let tree = sample_tree();

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["*.nothing"]);
    assert!(success);
    assert!(stdout.contains("No file found"), "{}", stdout);
}

#[test]
fn test_explicit_paths_listing() {
    let tree = sample_tree();

    let (stdout, _stderr, success) = run_dirx(tree.path(), &["a.txt", "sub", "b.txt"]);
    assert!(success);
    assert!(stdout.contains("a.txt"));
    assert!(stdout.contains("c.txt"), "directories are descended: {}", stdout);
    assert!(stdout.contains("File(s)"), "explicit paths always show totals");
}

#[test]
fn test_missing_explicit_path_warns() {
    let tree = sample_tree();

    let (stdout, stderr, success) = run_dirx(tree.path(), &["a.txt", "ghost.txt"]);
    assert!(success);
    assert!(stdout.contains("a.txt"));
    assert!(stderr.contains("ghost.txt"), "{}", stderr);
}

#[test]
fn test_default_options_from_environment() {
    let tree = sample_tree();

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_dirx"))
        .current_dir(tree.path())
        .env("DIRX_OPTIONS", "-b -o name")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run dirx");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().next(), Some("a.txt"), "{}", stdout);
}
