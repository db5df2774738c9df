// End-to-end release runs against real git repositories in temp dirs.

use std::env;
use std::fs;
use std::path::Path;

use git2::Repository;
use serial_test::serial;
use tempfile::TempDir;

use op_release::error::ReleaseError;
use op_release::release::run_release;
use op_release::ui::Reporter;
use op_release::version::{BumpKind, Version};

const MANIFEST: &str = "[meta]\nname = \"my-plugin\"\nversion = \"0.1.0\"\n";

// Build script that emits one artifact matching the default `*.op` glob.
const BUILD_SCRIPT: &str = "#!/bin/sh\necho \"building $1\"\nprintf 'artifact' > plugin.op\n";

#[cfg(unix)]
fn write_executable(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

// Initializes a repository holding the manifest and build script, with one
// initial commit so HEAD is born.
fn setup_test_repo(build_script: &str) -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    fs::write(temp_dir.path().join("info.toml"), MANIFEST).expect("Could not write manifest");
    write_executable(&temp_dir.path().join("build.sh"), build_script);

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("info.toml"))
        .expect("Could not add manifest");
    index
        .add_path(Path::new("build.sh"))
        .expect("Could not add build script");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = repo.signature().expect("Could not get sig");
    repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
        .expect("Could not create commit");

    temp_dir
}

#[test]
fn test_patch_release_end_to_end() {
    let temp_dir = setup_test_repo(BUILD_SCRIPT);
    let reporter = Reporter::new();

    let outcome = run_release(temp_dir.path(), BumpKind::Patch, &reporter)
        .expect("release should succeed");
    assert_eq!(outcome.name, "my-plugin");
    assert_eq!(outcome.prior, Version::new(0, 1, 0));
    assert_eq!(outcome.released, Version::new(0, 1, 1));

    let content = fs::read_to_string(temp_dir.path().join("info.toml")).unwrap();
    assert!(content.contains("version = \"0.1.1\""));
    assert!(!content.contains("0.1.0"));

    let repo = Repository::open(temp_dir.path()).unwrap();
    assert!(repo.find_reference("refs/tags/0.1.1").is_ok());

    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("Release: 0.1.1"));
    assert!(head.tree().unwrap().get_name("plugin.op").is_some());

    let parent = head.parent(0).unwrap();
    assert_eq!(parent.message(), Some("Version: 0.1.1"));
}

#[test]
fn test_minor_release_resets_patch() {
    let temp_dir = setup_test_repo(BUILD_SCRIPT);
    let reporter = Reporter::new();

    let outcome = run_release(temp_dir.path(), BumpKind::Minor, &reporter).unwrap();
    assert_eq!(outcome.released, Version::new(0, 2, 0));

    let repo = Repository::open(temp_dir.path()).unwrap();
    assert!(repo.find_reference("refs/tags/0.2.0").is_ok());
}

#[test]
fn test_outside_repository_fails_before_any_mutation() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("info.toml"), MANIFEST).unwrap();
    let reporter = Reporter::new();

    let err = run_release(temp_dir.path(), BumpKind::Patch, &reporter).unwrap_err();
    assert!(matches!(err, ReleaseError::NotARepository));

    let content = fs::read_to_string(temp_dir.path().join("info.toml")).unwrap();
    assert_eq!(content, MANIFEST);
}

#[test]
fn test_repository_without_commits_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    Repository::init(temp_dir.path()).unwrap();
    fs::write(temp_dir.path().join("info.toml"), MANIFEST).unwrap();
    let reporter = Reporter::new();

    let err = run_release(temp_dir.path(), BumpKind::Patch, &reporter).unwrap_err();
    assert!(matches!(err, ReleaseError::NotARepository));
}

#[test]
fn test_tag_collision_aborts_the_release() {
    let temp_dir = setup_test_repo(BUILD_SCRIPT);
    let repo = Repository::open(temp_dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight("0.1.1", head.as_object(), false)
        .unwrap();
    let reporter = Reporter::new();

    let err = run_release(temp_dir.path(), BumpKind::Patch, &reporter).unwrap_err();
    assert!(matches!(err, ReleaseError::TagAlreadyExists(tag) if tag == "0.1.1"));
}

#[test]
fn test_build_producing_no_artifacts_fails_the_artifact_commit() {
    let temp_dir = setup_test_repo("#!/bin/sh\necho \"no artifacts\"\n");
    let reporter = Reporter::new();

    let err = run_release(temp_dir.path(), BumpKind::Patch, &reporter).unwrap_err();
    assert!(matches!(err, ReleaseError::NothingToCommit(glob) if glob == "*.op"));

    // the version bump was already committed and tagged
    let repo = Repository::open(temp_dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("Version: 0.1.1"));
    assert!(repo.find_reference("refs/tags/0.1.1").is_ok());
}

#[test]
fn test_failing_build_still_commits_artifacts() {
    // the build writes its artifact but exits non-zero
    let temp_dir =
        setup_test_repo("#!/bin/sh\nprintf 'artifact' > plugin.op\nexit 1\n");
    let reporter = Reporter::new();

    let outcome = run_release(temp_dir.path(), BumpKind::Patch, &reporter)
        .expect("a failing build must not abort the release");
    assert_eq!(outcome.released, Version::new(0, 1, 1));

    let repo = Repository::open(temp_dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("Release: 0.1.1"));
}

#[test]
#[serial]
fn test_release_from_current_directory() {
    let temp_dir = setup_test_repo(BUILD_SCRIPT);
    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(temp_dir.path()).expect("Could not change to temp dir");

    let reporter = Reporter::new();
    let result = run_release(Path::new("."), BumpKind::Patch, &reporter);

    env::set_current_dir(original_dir).unwrap();
    assert!(result.is_ok(), "release from cwd should succeed");
}
