use clap::{Parser, Subcommand};
use simple_pages::{config, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-pages")]
#[command(about = "Static page generator for a directory of markdown documents")]
#[command(long_about = "\
Static page generator for a directory of markdown documents

Every document becomes a page rendered through templates/page.html. The
designated index document additionally receives a listing of all other
documents through {ENTRIES} and is rendered once more through
templates/index.html.

Project structure:

  project/
  ├── config.toml          # Optional, see 'simple-pages gen-config'
  ├── pages/
  │   ├── index.md         # Index document, contains {ENTRIES}
  │   └── page-one.md      # → src/page-one.html, listed as \"Page One\"
  └── templates/
      ├── page.html        # {NAME} and {BODY}
      └── index.html       # {NAME} and {BODY}

Inside documents, a paragraph containing only {IMAGE path} becomes an
<img> pointing into the asset directory (../.github/ by default).")]
#[command(version)]
struct Cli {
    /// Project root (holds pages/, templates/ and config.toml)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate every page and the index
    Build,
    /// Show what a build would generate without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.root)?;
            println!(
                "==> Building {} → {}",
                site_config.source_path(&cli.root).display(),
                site_config.output_path(&cli.root).display()
            );
            let report = generate::build(&cli.root, &site_config)?;
            output::print_build_output(&report, &cli.root);
            println!("==> Build complete");
        }
        Command::Check => {
            let site_config = config::load_config(&cli.root)?;
            println!(
                "==> Checking {}",
                site_config.source_path(&cli.root).display()
            );
            let report = generate::check(&cli.root, &site_config)?;
            output::print_check_output(&report);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
