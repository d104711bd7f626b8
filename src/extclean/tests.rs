use std::fs;
use std::path::PathBuf;

use rand::random;

use super::{run, RenameRules};
use crate::options::ToolOptions;

fn unique_temp_root() -> PathBuf {
    std::env::temp_dir().join(format!("assetools-extclean-{}", random::<u64>()))
}

fn options_for(root: &PathBuf) -> ToolOptions {
    ToolOptions {
        input_dir: root.join("input"),
        output_dir: root.join("output"),
        ..ToolOptions::default()
    }
}

#[test]
fn strips_trailing_extension_after_known_types() {
    let rules = RenameRules::new().expect("compile rules");
    assert_eq!(rules.clean_file_name("hero.skel.bytes").as_deref(), Some("hero.skel"));
    assert_eq!(rules.clean_file_name("hero.atlas.asset").as_deref(), Some("hero.atlas"));
    assert_eq!(rules.clean_file_name("hero.json.txt").as_deref(), Some("hero.json"));
    assert_eq!(rules.clean_file_name("hero.skel.bytes.meta").as_deref(), Some("hero.skel"));
}

#[test]
fn leaves_other_names_alone() {
    let rules = RenameRules::new().expect("compile rules");
    assert_eq!(rules.clean_file_name("hero.skel"), None);
    assert_eq!(rules.clean_file_name("hero.png"), None);
    assert_eq!(rules.clean_file_name(".skel.bytes"), None);
    assert_eq!(rules.clean_file_name("hero.SKEL.bytes"), None);
    assert_eq!(rules.clean_file_name("hero.skel."), None);
}

#[test]
fn earlier_rule_and_greedy_match_win() {
    let rules = RenameRules::new().expect("compile rules");
    assert_eq!(
        rules.clean_file_name("hero.json.skel.bytes").as_deref(),
        Some("hero.json.skel")
    );
    assert_eq!(
        rules.clean_file_name("a.skel.b.skel.c").as_deref(),
        Some("a.skel.b.skel")
    );
}

#[test]
fn run_mirrors_tree_and_counts_files() {
    let root = unique_temp_root();
    let input = root.join("input");
    fs::create_dir_all(input.join("chars/hero")).expect("create input tree");
    fs::write(input.join("chars/hero/hero.skel.bytes"), b"skel").expect("write skel");
    fs::write(input.join("chars/hero/hero.atlas.txt"), b"atlas").expect("write atlas");
    fs::write(input.join("chars/hero/hero.png"), b"png").expect("write png");
    fs::write(input.join("readme.md"), b"doc").expect("write readme");

    let summary = run(&options_for(&root)).expect("run extclean");

    assert_eq!(summary.renamed_count, 2);
    assert_eq!(summary.copied_count, 2);
    assert_eq!(summary.total, 4);
    assert!(summary.collisions.is_empty());

    let output = root.join("output");
    assert_eq!(fs::read(output.join("chars/hero/hero.skel")).expect("skel"), b"skel");
    assert_eq!(fs::read(output.join("chars/hero/hero.atlas")).expect("atlas"), b"atlas");
    assert_eq!(fs::read(output.join("chars/hero/hero.png")).expect("png"), b"png");
    assert_eq!(fs::read(output.join("readme.md")).expect("readme"), b"doc");
    assert!(!output.join("chars/hero/hero.skel.bytes").exists());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn run_reports_collisions() {
    let root = unique_temp_root();
    let input = root.join("input");
    fs::create_dir_all(&input).expect("create input");
    fs::write(input.join("hero.skel"), b"plain").expect("write plain");
    fs::write(input.join("hero.skel.bytes"), b"bytes").expect("write bytes");

    let summary = run(&options_for(&root)).expect("run extclean");

    assert_eq!(summary.collisions, vec!["hero.skel".to_string()]);
    // Walk order is sorted by name, so the `.bytes` copy is written last.
    assert_eq!(
        fs::read(root.join("output/hero.skel")).expect("read output"),
        b"bytes"
    );

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn run_fails_on_missing_input() {
    let root = unique_temp_root();
    let error = run(&options_for(&root)).expect_err("missing input");
    assert!(matches!(error, crate::error::ToolError::MissingInput(_)));
}

#[cfg(unix)]
#[test]
fn run_copies_symlinked_files() {
    use std::os::unix::fs::symlink;

    let root = unique_temp_root();
    let input = root.join("input");
    fs::create_dir_all(&input).expect("create input");
    fs::create_dir_all(root.join("shared")).expect("create shared");
    fs::write(root.join("shared/hero.skel.bytes"), b"skel").expect("write target");
    symlink(root.join("shared/hero.skel.bytes"), input.join("hero.skel.bytes")).expect("link");

    let summary = run(&options_for(&root)).expect("run extclean");

    assert_eq!(summary.total, 1);
    assert_eq!(summary.renamed_count, 1);
    assert_eq!(fs::read(root.join("output/hero.skel")).expect("read output"), b"skel");

    let _ = fs::remove_dir_all(&root);
}
