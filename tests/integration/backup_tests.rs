use stringsweep::backup::{backup_path, create_backup, BackupError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn make_site(parent: &Path) -> std::path::PathBuf {
    let site = parent.join("site");
    fs::create_dir_all(site.join("assets").join("js")).unwrap();
    fs::write(site.join("index.php"), "<?php echo 'Welcome aboard'; ?>").unwrap();
    fs::write(site.join("assets").join("js").join("app.js"), "alert(\"Saved!\");").unwrap();
    fs::write(site.join(".htaccess"), "Options -Indexes").unwrap();
    site
}

#[test]
fn test_backup_is_full_copy_including_hidden_and_ineligible_files() {
    let parent = TempDir::new().unwrap();
    let site = make_site(parent.path());

    let backup = create_backup(&site, "_backup").unwrap();

    assert_eq!(backup, parent.path().join("site_backup"));
    assert_eq!(
        fs::read_to_string(backup.join("index.php")).unwrap(),
        "<?php echo 'Welcome aboard'; ?>"
    );
    assert_eq!(
        fs::read_to_string(backup.join("assets").join("js").join("app.js")).unwrap(),
        "alert(\"Saved!\");"
    );
    assert!(backup.join(".htaccess").is_file());
}

#[test]
fn test_second_backup_fails_and_keeps_first() {
    let parent = TempDir::new().unwrap();
    let site = make_site(parent.path());
    let backup = create_backup(&site, "_backup").unwrap();
    fs::write(site.join("index.php"), "changed").unwrap();

    let err = create_backup(&site, "_backup").unwrap_err();

    assert!(matches!(err, BackupError::AlreadyExists(ref p) if p == &backup));
    assert_eq!(
        fs::read_to_string(backup.join("index.php")).unwrap(),
        "<?php echo 'Welcome aboard'; ?>"
    );
}

#[test]
fn test_custom_suffix() {
    let parent = TempDir::new().unwrap();
    let site = make_site(parent.path());

    let backup = create_backup(&site, ".orig").unwrap();

    assert_eq!(backup, parent.path().join("site.orig"));
    assert!(backup.join("index.php").is_file());
}

#[test]
fn test_backup_of_file_is_rejected() {
    let parent = TempDir::new().unwrap();
    let file = parent.path().join("single.js");
    fs::write(&file, "x").unwrap();

    assert!(matches!(
        create_backup(&file, "_backup"),
        Err(BackupError::SourceMissing(_))
    ));
    assert!(!backup_path(&file, "_backup").exists());
}

#[cfg(unix)]
#[test]
fn test_backup_follows_symlinks() {
    let parent = TempDir::new().unwrap();
    let site = make_site(parent.path());
    let shared = parent.path().join("shared.js");
    fs::write(&shared, "var s = 'shared string';").unwrap();
    std::os::unix::fs::symlink(&shared, site.join("linked.js")).unwrap();

    let backup = create_backup(&site, "_backup").unwrap();

    let copied = backup.join("linked.js");
    assert!(!fs::symlink_metadata(&copied).unwrap().file_type().is_symlink());
    assert_eq!(
        fs::read_to_string(copied).unwrap(),
        "var s = 'shared string';"
    );
}
