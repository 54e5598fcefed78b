use super::*;

use std::fs::{create_dir, create_dir_all, write};

fn relative(walk: &Walk, root: &Path) -> Vec<PathBuf> {
    walk.files
        .iter()
        .map(|p| p.strip_prefix(root).expect("under root").to_path_buf())
        .collect()
}

#[test]
fn non_recursive_lists_only_immediate_files() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    // root/
    //   b.txt
    //   a.txt
    //   sub/
    //     c.txt
    write(root.join("b.txt"), b"b").expect("write b.txt");
    write(root.join("a.txt"), b"a").expect("write a.txt");
    create_dir(root.join("sub")).expect("create sub");
    write(root.join("sub").join("c.txt"), b"c").expect("write c.txt");

    let walk = collect_files(root, false).expect("collect_files");

    assert_eq!(
        relative(&walk, root),
        vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
    );
    assert!(walk.errors.is_empty());
}

#[test]
fn recursive_descends_depth_first_in_name_order() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    // root/
    //   a/
    //     x/
    //       deep.txt
    //     mid.txt
    //   b.txt
    //   c/
    //     last.txt
    create_dir_all(root.join("a").join("x")).expect("create a/x");
    write(root.join("a").join("x").join("deep.txt"), b"1").expect("write deep");
    write(root.join("a").join("mid.txt"), b"2").expect("write mid");
    write(root.join("b.txt"), b"3").expect("write b");
    create_dir(root.join("c")).expect("create c");
    write(root.join("c").join("last.txt"), b"4").expect("write last");

    let walk = collect_files(root, true).expect("collect_files");

    assert_eq!(
        relative(&walk, root),
        vec![
            PathBuf::from("a/mid.txt"),
            PathBuf::from("a/x/deep.txt"),
            PathBuf::from("b.txt"),
            PathBuf::from("c/last.txt"),
        ]
    );
}

#[test]
fn missing_root_is_folder_not_found() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let missing = tmp.path().join("nope");

    let err = collect_files(&missing, true).expect_err("missing root");

    assert!(matches!(err, FsError::FolderNotFound { .. }));
}

#[test]
fn file_root_is_not_a_directory() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = tmp.path().join("plain.txt");
    write(&file, b"x").expect("write file");

    let err = collect_files(&file, false).expect_err("file root");

    assert!(matches!(err, FsError::NotADirectory { .. }));
}

#[test]
fn empty_root_yields_nothing() {
    let tmp = tempfile::tempdir().expect("create temp dir");

    let walk = collect_files(tmp.path(), true).expect("collect_files");

    assert!(walk.files.is_empty());
    assert!(walk.errors.is_empty());
}

#[cfg(unix)]
#[test]
fn symlinks_to_files_are_listed_but_dir_links_are_not_followed() {
    use std::os::unix::fs::symlink;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let outside = tempfile::tempdir().expect("create outside dir");
    let root = tmp.path();

    write(outside.path().join("secret.txt"), b"s").expect("write secret");
    write(root.join("target.txt"), b"t").expect("write target");
    symlink(root.join("target.txt"), root.join("link.txt")).expect("file symlink");
    symlink(outside.path(), root.join("linked_dir")).expect("dir symlink");
    symlink(root.join("missing"), root.join("dangling")).expect("dangling symlink");

    let walk = collect_files(root, true).expect("collect_files");

    assert_eq!(
        relative(&walk, root),
        vec![PathBuf::from("link.txt"), PathBuf::from("target.txt")]
    );
}

#[test]
fn tree_size_sums_nested_files() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    create_dir_all(root.join("a").join("b")).expect("create tree");
    write(root.join("one.bin"), [0u8; 100]).expect("write one");
    write(root.join("a").join("b").join("two.bin"), [0u8; 200]).expect("write two");

    assert_eq!(tree_size(root), 300);
    assert_eq!(tree_size(&root.join("missing")), 0);
}
