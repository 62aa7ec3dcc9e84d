//! Session-start conditional relaunch and autostart entry management.
//!
//! The `--boot` invocation plays the role of a boot receiver: read the
//! persisted flag synchronously, wait a short settling delay, then start
//! the clock screen. Every failure on this path is logged and swallowed;
//! a crash here would take the session-start sequence down with it.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

use crate::services::preferences::SettingsStore;

/// Delay between the boot signal and the relaunch attempt.
pub const BOOT_SETTLE_DELAY: Duration = Duration::from_secs(2);

const DESKTOP_ENTRY_NAME: &str = "holiday-clock.desktop";
const BINARY_NAME: &str = "holiday-clock";

/// One candidate way of starting the clock screen.
#[derive(Debug, Clone)]
pub struct LaunchTarget {
    pub name: &'static str,
    pub command: PathBuf,
}

/// Ordered relaunch candidates, most specific first.
pub fn launch_targets() -> Vec<LaunchTarget> {
    let mut targets = Vec::new();
    if let Ok(exe) = env::current_exe() {
        targets.push(LaunchTarget {
            name: "current executable",
            command: exe,
        });
    }
    if let Some(argv0) = env::args_os().next() {
        targets.push(LaunchTarget {
            name: "invocation name",
            command: PathBuf::from(argv0),
        });
    }
    targets.push(LaunchTarget {
        name: "binary on PATH",
        command: PathBuf::from(BINARY_NAME),
    });
    targets
}

/// Tries each target in order until one spawns. Generic over the spawner so
/// tests never fork real processes.
pub fn relaunch_with<F>(targets: &[LaunchTarget], mut spawn: F) -> Result<()>
where
    F: FnMut(&LaunchTarget) -> Result<()>,
{
    for target in targets {
        match spawn(target) {
            Ok(()) => {
                log::info!("relaunched clock screen via {}", target.name);
                return Ok(());
            }
            Err(err) => log::warn!("launch via {} failed: {:#}", target.name, err),
        }
    }
    Err(anyhow!("all {} launch targets failed", targets.len()))
}

/// Default spawner: start the target detached, without `--boot` so the new
/// process comes up as the main screen.
pub fn spawn_detached(target: &LaunchTarget) -> Result<()> {
    Command::new(&target.command)
        .spawn()
        .map(|_| ())
        .with_context(|| format!("failed to spawn {}", target.command.display()))
}

/// Entry point for the `--boot` invocation. Blocking reads are fine here;
/// this runs on its own short-lived process, not the UI loop.
pub fn run_boot_launch<F>(store: &dyn SettingsStore, delay: Duration, spawn: F)
where
    F: FnMut(&LaunchTarget) -> Result<()>,
{
    let enabled = store.auto_start_enabled();
    log::info!("boot signal received, auto-start enabled: {}", enabled);
    if !enabled {
        return;
    }

    thread::sleep(delay);
    if let Err(err) = relaunch_with(&launch_targets(), spawn) {
        log::error!("boot relaunch failed: {:#}", err);
    }
}

fn autostart_dir() -> Result<PathBuf> {
    let base = BaseDirs::new().ok_or_else(|| anyhow!("no home directory available"))?;
    Ok(base.config_dir().join("autostart"))
}

/// Installs a login autostart entry that starts the app with `--boot`, so
/// the persisted flag is still consulted at session start.
pub fn install_autostart() -> Result<()> {
    let exe = env::current_exe().context("failed to resolve current executable")?;
    let dir = autostart_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create dir {}", dir.display()))?;

    let entry = format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=Holiday Clock\n\
         Exec={} --boot\n\
         X-GNOME-Autostart-enabled=true\n",
        exe.display()
    );
    let path = dir.join(DESKTOP_ENTRY_NAME);
    fs::write(&path, entry)
        .with_context(|| format!("failed to write autostart entry {}", path.display()))?;
    log::info!("installed autostart entry at {}", path.display());
    Ok(())
}

pub fn remove_autostart() -> Result<()> {
    let path = autostart_dir()?.join(DESKTOP_ENTRY_NAME);
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("failed to remove autostart entry {}", path.display()))?;
        log::info!("removed autostart entry {}", path.display());
    }
    Ok(())
}
