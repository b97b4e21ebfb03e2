use std::fs;
use std::io::Cursor;

use examine::{NavConfig, Navigator, QUIT_OK};
use examine_cli::console::ConsoleHost;
use examine_cli::session::{copy_all, run_commands, show_current, ConsoleNavigator};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("fixture file should be written");
    path.display().to_string()
}

fn navigator(names: &[String]) -> ConsoleNavigator {
    let mut nav = Navigator::new(ConsoleHost::new(), NavConfig::default());
    for name in names {
        nav.register(name);
    }
    nav
}

fn run(nav: &mut ConsoleNavigator, script: &str) -> (i32, String) {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut out = Vec::new();
    let code = run_commands(nav, &mut input, &mut out).expect("commands run");
    (code, String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn preview_stops_after_requested_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(&dir, "a.txt", "one\ntwo\nthree\n");
    let mut nav = navigator(&[a.clone()]);
    nav.open_first().expect("a opens");

    let mut out = Vec::new();
    show_current(&mut nav, &mut out, 2).expect("preview printed");

    assert_eq!(
        String::from_utf8(out).expect("utf-8 output"),
        format!("==> {a} (file 1 of 1) <==\none\ntwo\n")
    );
}

#[test]
fn commands_walk_the_list() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(&dir, "a.txt", "alpha\n");
    let b = write(&dir, "b.txt", "beta\n");
    let mut nav = navigator(&[a.clone(), b.clone()]);
    nav.open_first().expect("a opens");

    let (code, out) = run(&mut nav, ":n\n:p\nq\n");

    assert_eq!(code, QUIT_OK);
    let a_header = format!("==> {a} (file 1 of 2) <==");
    let b_header = format!("==> {b} (file 2 of 2) <==");
    assert_eq!(out.matches(&a_header).count(), 2);
    assert_eq!(out.matches(&b_header).count(), 1);
    assert!(out.find(&b_header) < out.rfind(&a_header));
    assert!(out.contains("beta\n"));
}

#[test]
fn end_of_input_quits() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(&dir, "a.txt", "alpha\n");
    let mut nav = navigator(&[a]);
    nav.open_first().expect("a opens");

    let (code, _) = run(&mut nav, ":n\n");

    assert_eq!(code, QUIT_OK);
}

#[test]
fn file_info_reports_list_position_and_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(&dir, "a.txt", "one\ntwo\n");
    let b = write(&dir, "b.txt", "beta\n");
    let mut nav = navigator(&[a.clone(), b]);
    nav.open_first().expect("a opens");

    let (_, out) = run(&mut nav, ":f\nq\n");

    assert!(out.contains(&format!("{a} (file 1 of 2) line 2")));
}

#[test]
fn examine_opens_a_new_name_after_the_current_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(&dir, "a.txt", "alpha\n");
    let c = write(&dir, "c.txt", "gamma\n");
    let b = write(&dir, "b.txt", "beta\n");
    let mut nav = navigator(&[a, c]);
    nav.open_first().expect("a opens");

    let (_, out) = run(&mut nav, &format!(":e {b}\nq\n"));

    assert!(out.contains(&format!("==> {b} (file 2 of 3) <==")));
}

#[test]
fn copy_mode_concatenates_every_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(&dir, "a.txt", "alpha\n");
    let missing = dir.path().join("gone.txt").display().to_string();
    let b = write(&dir, "b.txt", "beta\n");
    let mut nav = navigator(&[a, missing, b]);
    nav.open_first().expect("a opens");

    let mut out = Vec::new();
    let code = copy_all(&mut nav, &mut out).expect("copy succeeds");

    assert_eq!(code, QUIT_OK);
    assert_eq!(String::from_utf8(out).expect("utf-8 output"), "alpha\nbeta\n");
}

#[test]
fn unprinted_preview_bytes_stay_readable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(&dir, "a.txt", "one\ntwo\nthree\n");
    let mut nav = navigator(&[a]);
    nav.open_first().expect("a opens");

    let mut preview = Vec::new();
    show_current(&mut nav, &mut preview, 1).expect("preview printed");
    let mut rest = Vec::new();
    nav.cat_current(&mut rest).expect("rest copied");

    assert!(String::from_utf8(preview).expect("utf-8 output").ends_with("<==\none\n"));
    assert_eq!(String::from_utf8(rest).expect("utf-8 output"), "two\nthree\n");
}
