//! xtask for confstate - build automation and tooling
//!
//! Generates man pages from the clap definitions shared with the binary.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask", about = "Build automation for confstate")]
enum Task {
    /// Generate man pages from clap definitions
    GenerateManPages {
        /// Output directory for man pages (default: ./man)
        #[arg(short, long, default_value = "man")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let task = Task::parse();

    match task {
        Task::GenerateManPages { output } => generate_man_pages(&output)?,
    }

    Ok(())
}

fn render(cmd: clap::Command, path: &Path) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create man page: {}", path.display()))?;
    clap_mangen::Man::new(cmd).render(&mut std::io::BufWriter::new(file))?;
    println!("✓ Generated: {}", path.display());
    Ok(())
}

fn generate_man_pages(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let cmd = confstate::cli::Cli::command();
    render(cmd.clone(), &output_dir.join("confstate.1"))?;

    for subcmd in cmd.get_subcommands().filter(|s| s.get_name() != "completion") {
        let file_name = format!("confstate-{}.1", subcmd.get_name());
        render(subcmd.clone(), &output_dir.join(file_name))?;
    }

    println!("\nMan pages generated in: {}", output_dir.display());
    Ok(())
}
