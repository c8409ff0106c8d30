//! End-to-end tests for the `retreat-site` binary against a copy of
//! `fixtures/site/`.

use retreat_site::assets::copy_dir_recursive;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn run(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_retreat-site"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("failed to run retreat-site")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn dist_html(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = fs::read_dir(root.join("dist"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "html"))
        .collect();
    files.sort();
    files
}

#[test]
fn no_arguments_runs_full_build() {
    let tmp = setup_project();
    let out = run(tmp.path(), &[]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(dist_html(tmp.path()).len(), 6);
    let text = stdout(&out);
    assert!(text.contains("001 index.html"));
    assert!(text.contains("Built 6 pages, 0 missing"));
}

#[test]
fn five_of_six_pages_built_when_one_fragment_missing() {
    let tmp = setup_project();
    fs::remove_file(tmp.path().join("pages/guest-info.html")).unwrap();

    let out = run(tmp.path(), &["build"]);

    assert!(out.status.success());
    assert_eq!(dist_html(tmp.path()).len(), 5);
    assert!(stdout(&out).contains("guest-info.html: missing"));
}

#[test]
fn missing_template_fails_the_run() {
    let tmp = setup_project();
    fs::remove_file(tmp.path().join("templates/footer.html")).unwrap();

    let out = run(tmp.path(), &["build"]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("TemplateNotFound"));
}

#[test]
fn rendered_page_has_metadata_and_nested_assets() {
    let tmp = setup_project();
    assert!(run(tmp.path(), &[]).status.success());

    let html = fs::read_to_string(tmp.path().join("dist/gallery.html")).unwrap();
    assert!(html.contains("<title>Photo Gallery | Sebastian Spa Retreat</title>"));
    assert!(html.contains(r#"<a class="nav-link active" href="gallery.html">"#));
    assert!(html.contains(r#"<script src="js/gallery.js"></script>"#));
    assert_eq!(
        fs::read(tmp.path().join("dist/images/rooms/master-suite.jpg")).unwrap(),
        b"fake-jpeg-suite"
    );
}

#[test]
fn repeated_builds_are_byte_identical() {
    let tmp = setup_project();
    assert!(run(tmp.path(), &[]).status.success());
    let first = fs::read(tmp.path().join("dist/index.html")).unwrap();
    assert!(run(tmp.path(), &[]).status.success());
    let second = fs::read(tmp.path().join("dist/index.html")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn json_report_lists_pages_and_assets() {
    let tmp = setup_project();
    fs::remove_file(tmp.path().join("pages/index.html")).unwrap();

    let out = run(tmp.path(), &["build", "--json"]);
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let pages = report["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 6);
    assert_eq!(pages[0]["file"], "index.html");
    assert_eq!(pages[0]["status"], "missing");
    assert_eq!(pages[1]["status"], "built");
    let gallery = report["assets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["name"] == "gallery")
        .unwrap();
    assert_eq!(gallery["status"], "skipped");
}

#[test]
fn output_flag_overrides_config() {
    let tmp = setup_project();
    let out = run(tmp.path(), &["--output", "public"]);
    assert!(out.status.success());
    assert!(tmp.path().join("public/index.html").is_file());
    assert!(!tmp.path().join("dist").exists());
}

#[test]
fn check_reports_leaking_placeholders_without_writing() {
    let tmp = setup_project();
    let out = run(tmp.path(), &["check"]);

    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("001 index.html"));
    assert!(text.contains("Unresolved: active_property"));
    assert!(!tmp.path().join("dist").exists());
}

#[test]
fn gen_config_output_is_loadable() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["gen-config"]);
    assert!(out.status.success());

    fs::write(tmp.path().join("site.toml"), &out.stdout).unwrap();
    let pages = run(tmp.path(), &["pages"]);
    assert!(pages.status.success());
    assert!(stdout(&pages).contains("006 guest-info.html"));
}
