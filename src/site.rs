//! The build: render every declared page, then mirror static assets.
//!
//! ```text
//! templates/header.html ─┐
//! pages/<file>          ─┼─→  dist/<file>
//! templates/footer.html ─┘
//! css/ js/ gallery/ images/  →  dist/css/ dist/js/ ...
//! ```
//!
//! ## Failure Handling
//!
//! | Condition                  | Result                                   |
//! |----------------------------|------------------------------------------|
//! | Missing header/footer      | Fatal: [`BuildError::TemplateNotFound`]  |
//! | Missing page fragment      | Page reported as missing, build goes on  |
//! | Missing asset directory    | Reported as skipped                      |
//! | Any other filesystem error | Fatal, surfaced where it happens         |
//!
//! Work is strictly sequential. Progress is reported through an optional
//! channel so the CLI can print while the build runs; library callers can
//! pass `None` and inspect the returned [`BuildReport`].

use crate::assets::{self, AssetError, AssetStatus};
use crate::config::{self, ConfigError, SiteConfig};
use crate::pages::Layout;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Asset copy failed: {0}")]
    Asset(#[from] AssetError),
    #[error("Template not found: {0}")]
    TemplateNotFound(PathBuf),
}

/// Progress notifications, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    Started { output_dir: PathBuf },
    PageBuilt { file: String, bytes: usize },
    PageMissing { file: String, source: PathBuf },
    AssetsStarted,
    AssetCopied { name: String, files: usize },
    AssetSkipped { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageStatus {
    Built { bytes: usize },
    Missing { source: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReport {
    pub file: String,
    #[serde(flatten)]
    pub status: PageStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetReport {
    pub name: String,
    #[serde(flatten)]
    pub status: AssetStatus,
}

/// Outcome of a completed build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub pages: Vec<PageReport>,
    pub assets: Vec<AssetReport>,
}

impl BuildReport {
    pub fn built(&self) -> impl Iterator<Item = &PageReport> {
        self.pages
            .iter()
            .filter(|p| matches!(p.status, PageStatus::Built { .. }))
    }

    pub fn missing(&self) -> impl Iterator<Item = &PageReport> {
        self.pages
            .iter()
            .filter(|p| matches!(p.status, PageStatus::Missing { .. }))
    }
}

/// Per-page findings from [`check`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageCheck {
    pub file: String,
    pub fragment_found: bool,
    /// Placeholders that would appear literally in this page's output.
    pub unresolved: Vec<String>,
}

fn emit(events: &Option<Sender<BuildEvent>>, event: BuildEvent) {
    if let Some(tx) = events {
        // The receiver going away only means nobody is printing.
        let _ = tx.send(event);
    }
}

fn read_template(path: &Path) -> Result<String, BuildError> {
    if !path.is_file() {
        return Err(BuildError::TemplateNotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Load the header and footer for `config`.
pub fn load_layout(root: &Path, config: &SiteConfig) -> Result<Layout, BuildError> {
    let header = read_template(&config.header_path(root))?;
    let footer = read_template(&config.footer_path(root))?;
    Ok(Layout::parse(&header, &footer))
}

/// Run the full build for the project at `root`.
pub fn build(
    root: &Path,
    config: &SiteConfig,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildReport, BuildError> {
    let layout = load_layout(root, config)?;

    let output_dir = config.output_path(root);
    if !output_dir.exists() {
        fs::create_dir(&output_dir)?;
    }
    emit(
        &events,
        BuildEvent::Started {
            output_dir: output_dir.clone(),
        },
    );

    let mut pages = Vec::with_capacity(config.pages.len());
    for page in &config.pages {
        let source = config.fragment_path(root, page);
        if !source.is_file() {
            log::warn!("page fragment not found: {}", source.display());
            emit(
                &events,
                BuildEvent::PageMissing {
                    file: page.file.clone(),
                    source: source.clone(),
                },
            );
            pages.push(PageReport {
                file: page.file.clone(),
                status: PageStatus::Missing { source },
            });
            continue;
        }

        let content = fs::read(&source)?;
        let html = layout.render_page(page, &content);
        fs::write(output_dir.join(&page.file), &html)?;
        log::debug!("rendered {} ({} bytes)", page.file, html.len());

        emit(
            &events,
            BuildEvent::PageBuilt {
                file: page.file.clone(),
                bytes: html.len(),
            },
        );
        pages.push(PageReport {
            file: page.file.clone(),
            status: PageStatus::Built { bytes: html.len() },
        });
    }

    emit(&events, BuildEvent::AssetsStarted);
    let mut assets = Vec::with_capacity(config.assets.len());
    for name in &config.assets {
        let status = assets::copy_asset_dir(root, &output_dir, name)?;
        match &status {
            AssetStatus::Copied { files, .. } => emit(
                &events,
                BuildEvent::AssetCopied {
                    name: name.clone(),
                    files: *files,
                },
            ),
            AssetStatus::Skipped => emit(&events, BuildEvent::AssetSkipped { name: name.clone() }),
        }
        assets.push(AssetReport {
            name: name.clone(),
            status,
        });
    }

    Ok(BuildReport {
        output_dir,
        pages,
        assets,
    })
}

/// Load `site.toml` from `root` and build with no progress channel.
pub fn build_site(root: &Path) -> Result<BuildReport, BuildError> {
    let config = config::load_config(root)?;
    build(root, &config, None)
}

/// Validate a project without writing anything.
///
/// Fails like [`build`] does on missing templates; otherwise reports, per
/// page, whether its fragment exists and which placeholders would leak.
pub fn check(root: &Path, config: &SiteConfig) -> Result<Vec<PageCheck>, BuildError> {
    let layout = load_layout(root, config)?;
    Ok(config
        .pages
        .iter()
        .map(|page| PageCheck {
            file: page.file.clone(),
            fragment_found: config.fragment_path(root, page).is_file(),
            unresolved: layout
                .unresolved(page)
                .into_iter()
                .map(String::from)
                .collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::sync::mpsc;

    #[test]
    fn builds_every_page_with_fragment() {
        let tmp = setup_fixtures();
        let report = build(tmp.path(), &SiteConfig::default(), None).unwrap();

        assert_eq!(report.built().count(), 6);
        assert_eq!(report.missing().count(), 0);
        for page in SiteConfig::default().pages {
            assert!(tmp.path().join("dist").join(&page.file).is_file(), "{}", page.file);
        }
    }

    #[test]
    fn missing_fragment_skips_only_that_page() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("pages/location.html")).unwrap();

        let report = build(tmp.path(), &SiteConfig::default(), None).unwrap();

        assert_eq!(report.built().count(), 5);
        let missing: Vec<_> = report.missing().map(|p| p.file.as_str()).collect();
        assert_eq!(missing, vec!["location.html"]);
        assert!(!tmp.path().join("dist/location.html").exists());
        assert_eq!(html_files(&tmp.path().join("dist")).len(), 5);
    }

    #[test]
    fn missing_header_is_fatal() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("templates/header.html")).unwrap();

        let result = build(tmp.path(), &SiteConfig::default(), None);

        assert!(matches!(result, Err(BuildError::TemplateNotFound(p)) if p.ends_with("header.html")));
        assert!(!tmp.path().join("dist").exists());
    }

    #[test]
    fn missing_footer_is_fatal() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("templates/footer.html")).unwrap();
        let result = build(tmp.path(), &SiteConfig::default(), None);
        assert!(matches!(result, Err(BuildError::TemplateNotFound(_))));
    }

    #[test]
    fn output_dir_parent_must_exist() {
        let tmp = setup_fixtures();
        let config = SiteConfig {
            output_dir: "no/such/parent".into(),
            ..SiteConfig::default()
        };
        let result = build(tmp.path(), &config, None);
        assert!(matches!(result, Err(BuildError::Io(_))));
    }

    #[test]
    fn gallery_page_gets_extra_scripts_in_footer() {
        let tmp = setup_fixtures();
        build(tmp.path(), &SiteConfig::default(), None).unwrap();

        let gallery = read_output(tmp.path(), "gallery.html");
        assert!(gallery.contains(r#"<script src="js/gallery.js"></script>"#));
        let index = read_output(tmp.path(), "index.html");
        assert!(!index.contains("gallery.js"));
        assert!(!index.contains("{{extra_scripts}}"));
    }

    #[test]
    fn output_is_header_content_footer() {
        let tmp = setup_fixtures();
        build(tmp.path(), &SiteConfig::default(), None).unwrap();

        let content = fs::read_to_string(tmp.path().join("pages/property.html")).unwrap();
        let out = read_output(tmp.path(), "property.html");
        let at = out.find(&content).expect("fragment embedded verbatim");
        assert!(out[..at].ends_with("</header>\n"));
        assert!(out[at + content.len()..].starts_with("<footer"));
    }

    #[test]
    fn non_utf8_fragment_is_copied_byte_for_byte() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("pages/property.html"), b"<p>caf\xe9</p>").unwrap();

        let report = build(tmp.path(), &SiteConfig::default(), None).unwrap();

        assert_eq!(report.built().count(), 6);
        assert_eq!(html_files(&tmp.path().join("dist")).len(), 6);
        let out = fs::read(tmp.path().join("dist/property.html")).unwrap();
        assert!(out.windows(11).any(|w| w == b"<p>caf\xe9</p>"));
        assert!(tmp.path().join("dist/css/style.css").is_file());
    }

    #[test]
    fn assets_mirrored_and_absent_ones_skipped() {
        let tmp = setup_fixtures();
        let report = build(tmp.path(), &SiteConfig::default(), None).unwrap();

        assert!(tmp.path().join("dist/images/rooms/master-suite.jpg").is_file());
        assert!(tmp.path().join("dist/css/style.css").is_file());
        let gallery = report.assets.iter().find(|a| a.name == "gallery").unwrap();
        assert_eq!(gallery.status, AssetStatus::Skipped);
    }

    #[test]
    fn rebuild_is_byte_identical() {
        let tmp = setup_fixtures();
        build(tmp.path(), &SiteConfig::default(), None).unwrap();
        let first = snapshot_dir(&tmp.path().join("dist"));
        build(tmp.path(), &SiteConfig::default(), None).unwrap();
        let second = snapshot_dir(&tmp.path().join("dist"));
        assert_eq!(first, second);
    }

    #[test]
    fn events_follow_build_order() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("pages/index.html")).unwrap();
        let (tx, rx) = mpsc::channel();

        build(tmp.path(), &SiteConfig::default(), Some(tx)).unwrap();
        let events: Vec<_> = rx.iter().collect();

        assert!(matches!(events[0], BuildEvent::Started { .. }));
        assert!(matches!(&events[1], BuildEvent::PageMissing { file, .. } if file == "index.html"));
        assert!(matches!(&events[2], BuildEvent::PageBuilt { file, .. } if file == "property.html"));
        assert_eq!(events[7], BuildEvent::AssetsStarted);
        assert_eq!(events.len(), 8 + 4);
    }

    #[test]
    fn build_site_loads_site_toml() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("site.toml"),
            "output_dir = \"public\"\nassets = []\n",
        )
        .unwrap();

        let report = build_site(tmp.path()).unwrap();

        assert_eq!(report.output_dir, tmp.path().join("public"));
        assert!(report.assets.is_empty());
        assert!(tmp.path().join("public/index.html").is_file());
    }

    #[test]
    fn check_reports_fragments_and_leaks() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("pages/guest-info.html")).unwrap();

        let checks = check(tmp.path(), &SiteConfig::default()).unwrap();

        let guest = checks.iter().find(|c| c.file == "guest-info.html").unwrap();
        assert!(!guest.fragment_found);
        let index = checks.iter().find(|c| c.file == "index.html").unwrap();
        assert!(index.fragment_found);
        assert!(index.unresolved.contains(&"active_gallery".to_string()));
        assert!(!index.unresolved.contains(&"active_home".to_string()));
        assert!(!tmp.path().join("dist").exists());
    }
}
