use std::env;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use tp_store::{StoreLocation, WarpPoint, WarpStore};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    run_in(cli, env::current_dir(), out)
}

/// Run `cli` as if started in `cwd`. Only `add` and `remove` need the
/// working directory, so an unreadable one does not block `warp` or `list`.
fn run_in(cli: Cli, cwd: io::Result<PathBuf>, out: &mut dyn Write) -> anyhow::Result<()> {
    let Cli { command, format, home, file, .. } = cli;
    let path = StoreLocation::new(home, file).resolve()?;
    debug!(path = %path.display(), "using warp point store");
    let store = WarpStore::open(path);

    match command {
        Command::Add(args) => cmd_add(&store, args, cwd, out),
        Command::Remove(args) => cmd_remove(&store, args, cwd, out),
        Command::List(_) => cmd_list(&store, &format, out),
        Command::Warp(args) => cmd_warp(&store, args, out),
        Command::Prune(_) => cmd_prune(&store, &format, out),
    }
}

type FileStore = WarpStore<tp_store::FileBackend>;

fn cmd_add(
    store: &FileStore,
    args: AddArgs,
    cwd: io::Result<PathBuf>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let key = args.key.trim();
    let dir = match args.dir {
        Some(dir) if dir.is_absolute() => clean_path(&dir),
        Some(dir) => clean_path(&current_dir(cwd)?.join(dir)),
        None => current_dir(cwd)?,
    };
    let dir = path_str(&dir)?;
    store.add(key, dir)?;
    writeln!(out, "{} Added warp point {} → {}", "✓".green().bold(), key.yellow(), dir)?;
    Ok(())
}

fn cmd_remove(
    store: &FileStore,
    args: RemoveArgs,
    cwd: io::Result<PathBuf>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if args.keys.is_empty() {
        let cwd = current_dir(cwd)?;
        let dir = path_str(&cwd)?;
        match store.remove_by_target(dir)? {
            Some(key) => writeln!(out, "{} Removed warp point {}", "✓".green().bold(), key.yellow())?,
            None => writeln!(out, "No warp point to {}", dir)?,
        }
        return Ok(());
    }
    for key in args.keys.iter().map(|k| k.trim()) {
        if store.remove(key)? {
            writeln!(out, "{} Removed warp point {}", "✓".green().bold(), key.yellow())?;
        } else {
            writeln!(out, "No warp point {}", key)?;
        }
    }
    Ok(())
}

fn cmd_list(store: &FileStore, format: &OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    let warp_points = store.list()?;
    print_warp_points(&warp_points, format, out)
}

fn cmd_warp(store: &FileStore, args: WarpArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let dir = store.lookup(args.key.trim())?;
    writeln!(out, "{dir}")?;
    Ok(())
}

fn cmd_prune(store: &FileStore, format: &OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    let pruned = store.prune()?;
    match format {
        OutputFormat::Json => print_warp_points(&pruned, format, out),
        OutputFormat::Text => {
            for wp in &pruned {
                writeln!(out, "Removing warp point {} to {}", wp.key.yellow(), wp.target)?;
            }
            if pruned.is_empty() {
                writeln!(out, "{} Nothing to prune.", "✓".green())?;
            }
            Ok(())
        }
    }
}

fn print_warp_points(
    warp_points: &[WarpPoint],
    format: &OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(warp_points)?)?;
        }
        OutputFormat::Text => {
            let width = warp_points.iter().map(|wp| wp.key.len()).max().unwrap_or(0);
            for wp in warp_points {
                writeln!(out, "{:<width$} {}", wp.key, wp.target)?;
            }
        }
    }
    Ok(())
}

fn path_str(path: &Path) -> anyhow::Result<&str> {
    path.to_str()
        .with_context(|| format!("directory path is not valid UTF-8: {}", path.display()))
}

fn current_dir(cwd: io::Result<PathBuf>) -> anyhow::Result<PathBuf> {
    cwd.context("cannot determine current directory")
}

/// Lexically clean an absolute path: drop `.`, resolve `..` against the
/// preceding component, and drop any trailing separator.
fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root.
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}
