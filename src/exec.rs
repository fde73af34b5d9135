// Thin wrappers around tokio::process for the external CLIs the kit drives
// (k3d, flux, kubectl, docker-compose, installer scripts).

use std::process::Stdio;

use anyhow::{bail, Context, Result};
use simplelog::*;
use tokio::process::Command;

/// Borrow an owned argument list for the runners below.
pub fn argv(args: &[String]) -> Vec<&str> {
    args.iter().map(String::as_str).collect()
}

/// Run a command, capture its output, and fold a non-zero exit (with the
/// captured stderr) into the returned error. Returns trimmed stdout.
pub async fn run_capture(program: &str, args: &[&str]) -> Result<String> {
    debug!("running: {program} {}", args.join(" "));

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .with_context(|| format!("could not invoke {program} (is it installed?)"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "{program} {} failed ({}): {}",
            args.join(" "),
            output.status,
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a command with stdio inherited, so the tool's own progress output
/// (k3d spinners, flux install status) reaches the user directly.
pub async fn run_streaming(program: &str, args: &[&str]) -> Result<()> {
    debug!("running: {program} {}", args.join(" "));

    let status = Command::new(program)
        .args(args)
        .status()
        .await
        .with_context(|| format!("could not invoke {program} (is it installed?)"))?;

    if !status.success() {
        bail!("{program} {} failed ({status})", args.join(" "));
    }

    Ok(())
}

/// Like run_streaming, but with extra environment variables for the child.
/// Secrets go through here so they never appear on a command line.
pub async fn run_streaming_with_env(
    program: &str,
    args: &[&str],
    envs: &[(&str, &str)],
) -> Result<()> {
    debug!("running: {program} {}", args.join(" "));

    let mut command = Command::new(program);
    command.args(args);
    for (key, value) in envs {
        command.env(key, value);
    }

    let status = command
        .status()
        .await
        .with_context(|| format!("could not invoke {program} (is it installed?)"))?;

    if !status.success() {
        bail!("{program} {} failed ({status})", args.join(" "));
    }

    Ok(())
}

/// Whether an executable of this name is resolvable on PATH.
pub async fn binary_on_path(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}
