use clap::{Parser, Subcommand};
use retreat_site::{config, output, site};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "retreat-site")]
#[command(about = "Build the rental site from templates, page fragments, and assets")]
#[command(long_about = "\
Build the rental site from templates, page fragments, and assets

Running with no command performs a full build.

Project structure:

  ./
  ├── site.toml                    # Optional overrides (see gen-config)
  ├── templates/
  │   ├── header.html              # {{title}}, {{description}}, {{active_home}}, ...
  │   └── footer.html              # {{extra_scripts}}
  ├── pages/
  │   ├── index.html               # One fragment per declared page
  │   └── gallery.html
  ├── css/ js/ gallery/ images/    # Copied verbatim into the output
  └── dist/                        # Output

Each output page is the rendered header, the fragment, and the rendered
footer, in that order. A page whose fragment is missing is reported and
skipped; the rest are still built.")]
#[command(version)]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Output directory (overrides `output_dir` in site.toml)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page and copy assets (default)
    Build {
        /// Print the build report as JSON instead of progress lines
        #[arg(long)]
        json: bool,
    },
    /// Report missing fragments and placeholders that would stay unrendered
    Check,
    /// List the configured pages
    Pages,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Build { json: false });

    match command {
        Command::Build { json: true } => {
            let site_config = load_config(&cli.root, cli.output.as_deref())?;
            let report = site::build(&cli.root, &site_config, None)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Build { json: false } => {
            let site_config = load_config(&cli.root, cli.output.as_deref())?;
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                let mut formatter = output::EventFormatter::default();
                for event in rx {
                    for line in formatter.format(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = site::build(&cli.root, &site_config, Some(tx));
            // The sender was moved into `build`, so the printer drains and exits.
            let _ = printer.join();
            let report = result?;
            output::print_build_summary(&report);
        }
        Command::Check => {
            let site_config = load_config(&cli.root, cli.output.as_deref())?;
            let checks = site::check(&cli.root, &site_config)?;
            output::print_check_output(&checks);
            let problems = checks
                .iter()
                .filter(|c| !c.fragment_found || !c.unresolved.is_empty())
                .count();
            if problems == 0 {
                println!("==> All pages complete");
            } else {
                println!("==> {} of {} pages need attention", problems, checks.len());
            }
        }
        Command::Pages => {
            let site_config = load_config(&cli.root, cli.output.as_deref())?;
            output::print_pages(&site_config.pages);
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// Load `site.toml` and apply the `--output` override.
fn load_config(
    root: &Path,
    output: Option<&Path>,
) -> Result<config::SiteConfig, config::ConfigError> {
    let mut site_config = config::load_config(root)?;
    if let Some(output) = output {
        site_config.output_dir = output.to_string_lossy().into_owned();
        site_config.validate()?;
    }
    Ok(site_config)
}
