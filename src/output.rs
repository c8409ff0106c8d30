//! CLI output formatting.
//!
//! Each report has a `format_*` function returning `Vec<String>` for
//! testability and, where the CLI needs it, a `print_*` wrapper that writes to
//! stdout. Format functions are pure.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! ==> Building into dist
//! 001 index.html (2048 bytes)
//! 002 property.html: missing pages/property.html
//! ==> Copying assets
//!     css/ (3 files)
//!     gallery/ (skipped)
//! Built 5 pages, 1 missing, 2 asset directories copied
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 index.html
//!     Unresolved: active_property, active_gallery
//! 002 property.html
//!     Missing fragment
//! ```

use crate::assets::AssetStatus;
use crate::site::{BuildEvent, BuildReport, PageCheck};
use crate::types::PageConfig;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Tracks page numbering across a stream of build events.
#[derive(Debug, Default)]
pub struct EventFormatter {
    page: usize,
}

impl EventFormatter {
    pub fn format(&mut self, event: &BuildEvent) -> Vec<String> {
        match event {
            BuildEvent::Started { output_dir } => {
                vec![format!("==> Building into {}", output_dir.display())]
            }
            BuildEvent::PageBuilt { file, bytes } => {
                self.page += 1;
                vec![format!("{} {} ({} bytes)", format_index(self.page), file, bytes)]
            }
            BuildEvent::PageMissing { file, source } => {
                self.page += 1;
                vec![format!(
                    "{} {}: missing {}",
                    format_index(self.page),
                    file,
                    source.display()
                )]
            }
            BuildEvent::AssetsStarted => vec!["==> Copying assets".to_string()],
            BuildEvent::AssetCopied { name, files } => {
                vec![format!("    {}/ ({})", name, plural(*files, "file", "files"))]
            }
            BuildEvent::AssetSkipped { name } => vec![format!("    {}/ (skipped)", name)],
        }
    }
}

/// One-line summary of a finished build.
pub fn format_build_summary(report: &BuildReport) -> Vec<String> {
    let built = report.built().count();
    let missing = report.missing().count();
    let copied = report
        .assets
        .iter()
        .filter(|a| matches!(a.status, AssetStatus::Copied { .. }))
        .count();
    vec![format!(
        "Built {}, {} missing, {} copied",
        plural(built, "page", "pages"),
        missing,
        plural(copied, "asset directory", "asset directories"),
    )]
}

pub fn print_build_summary(report: &BuildReport) {
    for line in format_build_summary(report) {
        println!("{}", line);
    }
}

/// Per-page findings from `check`.
pub fn format_check_output(checks: &[PageCheck]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, check) in checks.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), check.file));
        if !check.fragment_found {
            lines.push("    Missing fragment".to_string());
        }
        if !check.unresolved.is_empty() {
            lines.push(format!("    Unresolved: {}", check.unresolved.join(", ")));
        }
    }
    lines
}

pub fn print_check_output(checks: &[PageCheck]) {
    for line in format_check_output(checks) {
        println!("{}", line);
    }
}

/// The page table: file, title, and highlighted nav sections.
pub fn format_pages(pages: &[PageConfig]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.file));
        lines.push(format!("    Title: {}", page.title));
        if !page.active.is_empty() {
            lines.push(format!("    Active: {}", page.active.join(", ")));
        }
        if let Some(extra) = &page.extra_scripts {
            lines.push(format!("    Extra scripts: {}", extra));
        }
    }
    lines
}

pub fn print_pages(pages: &[PageConfig]) {
    for line in format_pages(pages) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_pages;
    use crate::site::{AssetReport, PageReport, PageStatus};
    use std::path::PathBuf;

    #[test]
    fn format_index_zero_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn event_lines_number_pages_in_order() {
        let mut fmt = EventFormatter::default();
        let lines: Vec<String> = [
            BuildEvent::Started {
                output_dir: PathBuf::from("dist"),
            },
            BuildEvent::PageBuilt {
                file: "index.html".into(),
                bytes: 10,
            },
            BuildEvent::PageMissing {
                file: "property.html".into(),
                source: PathBuf::from("pages/property.html"),
            },
            BuildEvent::AssetsStarted,
            BuildEvent::AssetCopied {
                name: "css".into(),
                files: 1,
            },
            BuildEvent::AssetSkipped {
                name: "gallery".into(),
            },
        ]
        .iter()
        .flat_map(|e| fmt.format(e))
        .collect();

        assert_eq!(
            lines,
            vec![
                "==> Building into dist",
                "001 index.html (10 bytes)",
                "002 property.html: missing pages/property.html",
                "==> Copying assets",
                "    css/ (1 file)",
                "    gallery/ (skipped)",
            ]
        );
    }

    #[test]
    fn summary_counts_pages_and_assets() {
        let report = BuildReport {
            output_dir: PathBuf::from("dist"),
            pages: vec![
                PageReport {
                    file: "a.html".into(),
                    status: PageStatus::Built { bytes: 1 },
                },
                PageReport {
                    file: "b.html".into(),
                    status: PageStatus::Missing {
                        source: PathBuf::from("pages/b.html"),
                    },
                },
            ],
            assets: vec![AssetReport {
                name: "css".into(),
                status: AssetStatus::Copied { files: 2, dirs: 1 },
            }],
        };
        assert_eq!(
            format_build_summary(&report),
            vec!["Built 1 page, 1 missing, 1 asset directory copied"]
        );
    }

    #[test]
    fn check_output_lists_problems_only() {
        let checks = vec![
            PageCheck {
                file: "index.html".into(),
                fragment_found: true,
                unresolved: vec!["active_gallery".into(), "active_guest".into()],
            },
            PageCheck {
                file: "gallery.html".into(),
                fragment_found: false,
                unresolved: vec![],
            },
        ];
        assert_eq!(
            format_check_output(&checks),
            vec![
                "001 index.html",
                "    Unresolved: active_gallery, active_guest",
                "002 gallery.html",
                "    Missing fragment",
            ]
        );
    }

    #[test]
    fn pages_listing_shows_extra_scripts() {
        let lines = format_pages(&default_pages());
        assert_eq!(lines[0], "001 index.html");
        assert!(lines.contains(&"    Active: gallery".to_string()));
        assert!(
            lines
                .iter()
                .any(|l| l.starts_with("    Extra scripts: <script"))
        );
    }
}
