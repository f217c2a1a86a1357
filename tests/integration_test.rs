use git_changeset::{self, ChangedFile, Error, FileStatus, Scope};
use std::fs;
use std::path::Path;
use std::process::Command;
use tree_fs::{Tree, TreeBuilder};

fn git(root: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn setup_test_repo() -> Tree {
    let tree = TreeBuilder::default()
        .add_file("file1.txt", "original content\n")
        .add_file("dir1/file2.txt", "file 2 content\n")
        .add_file("dir1/file4.txt", "file 4 content\n")
        .create()
        .expect("Failed to create test repo tree");

    git(&tree.root, &["init", "--quiet"]);
    git(&tree.root, &["config", "user.name", "Test User"]);
    git(&tree.root, &["config", "user.email", "test@example.com"]);
    git(&tree.root, &["config", "core.autocrlf", "false"]);
    git(&tree.root, &["add", "."]);
    git(&tree.root, &["commit", "--quiet", "-m", "Initial commit"]);

    tree
}

fn find<'a>(files: &'a [ChangedFile], path: &str) -> &'a ChangedFile {
    files
        .iter()
        .find(|f| f.path == path)
        .unwrap_or_else(|| panic!("{path} should be in changes: {files:?}"))
}

#[test]
fn test_clean_repository_has_no_changes() {
    let repo = setup_test_repo();
    let inspector = git_changeset::new(&repo.root).expect("Failed to create inspector");

    for scope in [Scope::Staged, Scope::WorkingTree] {
        assert!(inspector.list_changed_paths(scope).unwrap().is_empty());
        assert!(inspector
            .list_changed_paths_with_status(scope)
            .unwrap()
            .is_empty());
        assert!(inspector.get_changed_files(scope).unwrap().is_empty());
    }
}

#[test]
fn test_working_tree_changes_include_untracked_files() {
    let repo = setup_test_repo();
    fs::write(repo.root.join("file1.txt"), "modified content\n").expect("Failed to modify file1");
    fs::create_dir_all(repo.root.join("dir2")).expect("Failed to create dir2");
    fs::write(repo.root.join("dir2/file3.txt"), "new file content\n")
        .expect("Failed to create file3");

    let inspector = git_changeset::new(&repo.root).expect("Failed to create inspector");

    let files = inspector
        .get_changed_files(Scope::WorkingTree)
        .expect("Failed to get changed files");
    assert_eq!(files.len(), 2, "Should have 2 changed files: {files:?}");
    assert_eq!(find(&files, "file1.txt").kind(), FileStatus::Modified);
    assert_eq!(find(&files, "dir2/file3.txt").kind(), FileStatus::Added);
    assert!(files.iter().all(|f| f.scope == Scope::WorkingTree));

    let paths = inspector
        .list_changed_paths(Scope::WorkingTree)
        .expect("Failed to list paths");
    let from_files: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, from_files, "Both listings should agree on order");
}

#[test]
fn test_read_only_query_skips_untracked_files() {
    let repo = setup_test_repo();
    fs::write(repo.root.join("untracked.txt"), "new\n").expect("Failed to create file");

    let inspector = git_changeset::new(&repo.root)
        .expect("Failed to create inspector")
        .intent_to_add(false);

    assert!(inspector
        .list_changed_paths(Scope::WorkingTree)
        .unwrap()
        .is_empty());

    inspector
        .stage_intent_to_add()
        .expect("Failed to stage intent-to-add");

    assert_eq!(
        inspector.list_changed_paths(Scope::WorkingTree).unwrap(),
        ["untracked.txt"]
    );
}

#[test]
fn test_staged_changes_and_renames() {
    let repo = setup_test_repo();
    fs::write(repo.root.join("file1.txt"), "staged content\n").expect("Failed to modify file1");
    git(&repo.root, &["mv", "dir1/file4.txt", "dir1/renamed.txt"]);
    git(&repo.root, &["rm", "--quiet", "dir1/file2.txt"]);
    git(&repo.root, &["add", "file1.txt"]);

    let inspector = git_changeset::new(&repo.root).expect("Failed to create inspector");

    let files = inspector
        .get_changed_files(Scope::Staged)
        .expect("Failed to get staged files");
    assert_eq!(files.len(), 3, "Should have 3 staged files: {files:?}");
    assert_eq!(find(&files, "file1.txt").status, "M");
    assert_eq!(find(&files, "dir1/file2.txt").kind(), FileStatus::Deleted);

    let renamed = find(&files, "dir1/renamed.txt");
    assert_eq!(renamed.kind(), FileStatus::Renamed);
    assert_eq!(renamed.old_path.as_deref(), Some("dir1/file4.txt"));
    assert_eq!(renamed.scope, Scope::Staged);

    let rows = inspector
        .list_changed_paths_with_status(Scope::Staged)
        .unwrap();
    assert!(rows.contains(&"M\tfile1.txt".to_string()), "{rows:?}");

    assert!(inspector
        .get_changed_files(Scope::WorkingTree)
        .unwrap()
        .is_empty());
}

#[test]
fn test_show_diff_streams_successfully() {
    let repo = setup_test_repo();
    fs::write(repo.root.join("file1.txt"), "modified content\n").expect("Failed to modify file1");

    let inspector = git_changeset::new(&repo.root).expect("Failed to create inspector");

    inspector
        .show_diff("file1.txt", Scope::WorkingTree)
        .expect("Failed to show working-tree diff");
    inspector
        .show_diff("file1.txt", Scope::Staged)
        .expect("Failed to show staged diff");
}

#[test]
fn test_missing_executable_fails_without_records() {
    let repo = setup_test_repo();
    let inspector = git_changeset::new(&repo.root)
        .expect("Failed to create inspector")
        .with_program("git-changeset-no-such-binary");

    assert!(matches!(
        inspector.get_changed_files(Scope::Staged),
        Err(Error::GitCommandError(_))
    ));
    assert!(matches!(
        inspector.list_changed_paths(Scope::WorkingTree),
        Err(Error::GitCommandError(_))
    ));
    assert!(inspector.show_diff("file1.txt", Scope::Staged).is_err());
}

#[test]
fn test_directory_outside_repository_fails_without_records() {
    let dir = TreeBuilder::default()
        .add_file("file1.txt", "not tracked\n")
        .create()
        .expect("Failed to create plain directory");
    let inspector = git_changeset::new(&dir.root).expect("Failed to create inspector");

    assert!(matches!(
        inspector.stage_intent_to_add(),
        Err(Error::GitCommandError(_))
    ));
    for scope in [Scope::Staged, Scope::WorkingTree] {
        assert!(matches!(
            inspector.list_changed_paths(scope),
            Err(Error::GitCommandError(_))
        ));
        assert!(matches!(
            inspector.get_changed_files(scope),
            Err(Error::GitCommandError(_))
        ));
        assert!(matches!(
            inspector.show_diff("file1.txt", scope),
            Err(Error::GitCommandError(_))
        ));
    }
    assert!(matches!(
        inspector.intent_to_add(false).list_changed_paths(Scope::WorkingTree),
        Err(Error::GitCommandError(_))
    ));
}

#[test]
fn test_untracked_paths_with_leading_whitespace() {
    let repo = setup_test_repo();
    fs::write(repo.root.join(" lead.txt"), "lead\n").expect("Failed to create file");

    let inspector = git_changeset::new(&repo.root).expect("Failed to create inspector");

    let paths = inspector.list_changed_paths(Scope::WorkingTree).unwrap();
    assert_eq!(paths, [" lead.txt"]);
    let files = inspector.get_changed_files(Scope::WorkingTree).unwrap();
    assert_eq!(find(&files, " lead.txt").kind(), FileStatus::Added);

    fs::write(repo.root.join(" "), "space\n").expect("Failed to create file");

    let paths = inspector.list_changed_paths(Scope::WorkingTree).unwrap();
    let files = inspector
        .get_changed_files(Scope::WorkingTree)
        .expect("Whitespace-only path should parse");
    let from_files: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, from_files);
    assert!(paths.contains(&" ".to_string()), "{paths:?}");
}

#[test]
fn test_missing_repository_path() {
    let result = git_changeset::new(Path::new("/definitely/not/a/repo"));
    assert!(matches!(result, Err(Error::RepositoryNotFound(_))));
}
