use clap::CommandFactory;
use clap_complete::{generate_to, Shell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[allow(dead_code)]
#[path = "src/cli/args.rs"]
mod args;

use args::Cli;

const BIN_NAME: &str = "contract-verify";

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli/args.rs");
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap_or_else(|_| "target".to_string()));

    write_man_pages(&out_dir)?;
    write_completions(&out_dir.join("completions"))?;
    Ok(())
}

/// Man pages go to `man/man1` in the package, or to `OUT_DIR` when the
/// source tree is read-only.
fn write_man_pages(out_dir: &Path) -> io::Result<()> {
    let cmd = Cli::command().name(BIN_NAME);
    let package_dir = Path::new("man").join("man1");

    match render_pages(&cmd, &package_dir, None) {
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            let fallback = out_dir.join("man1");
            println!(
                "cargo:warning=man pages written to {} ({} is read-only)",
                fallback.display(),
                package_dir.display()
            );
            render_pages(&cmd, &fallback, None)
        }
        other => other,
    }
}

/// One page per command, named `contract-verify-<sub>.1` for subcommands.
fn render_pages(cmd: &clap::Command, dir: &Path, parent: Option<&str>) -> io::Result<()> {
    fs::create_dir_all(dir)?;

    let page_name = match parent {
        Some(parent) => format!("{}-{}", parent, cmd.get_name()),
        None => cmd.get_name().to_string(),
    };

    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(dir.join(format!("{}.1", page_name)), buffer)?;

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        render_pages(sub, dir, Some(&page_name))?;
    }
    Ok(())
}

fn write_completions(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut cmd = Cli::command();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        generate_to(shell, &mut cmd, BIN_NAME, dir)?;
    }
    Ok(())
}
