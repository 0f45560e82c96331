//! Environment readiness check.

use crate::config::ProbeConfig;
use crate::renderer::chromium::{find_chromium, CHROMIUM_PATH_ENV};
use crate::targets::load_targets;
use anyhow::Result;

/// Check the browser binary, the artifact directory and the target list.
pub async fn run(config: &ProbeConfig) -> Result<()> {
    println!("urlcheck doctor");
    println!("===============");
    println!();

    println!("OS:   {}", std::env::consts::OS);
    println!("Arch: {}", std::env::consts::ARCH);
    println!();

    let chromium = find_chromium(config.chromium_path.as_deref());
    match &chromium {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Install Chrome/Chromium or set {CHROMIUM_PATH_ENV}."
        ),
    }

    let artifact_ok = match std::fs::create_dir_all(&config.artifact_dir) {
        Ok(()) => {
            println!(
                "[OK] Artifact directory {} is usable",
                config.artifact_dir.display()
            );
            true
        }
        Err(e) => {
            println!(
                "[!!] Artifact directory {} cannot be created: {e}",
                config.artifact_dir.display()
            );
            false
        }
    };

    let targets_ok = match load_targets(&config.targets_file) {
        Ok(targets) => {
            println!(
                "[OK] {} lists {} target(s)",
                config.targets_file.display(),
                targets.len()
            );
            true
        }
        Err(e) => {
            println!("[!!] {e}");
            false
        }
    };

    println!();
    if artifact_ok && targets_ok {
        if chromium.is_some() {
            println!("Status: READY");
        } else {
            println!("Status: READY for API targets only");
            println!("  Web targets will abort the run until a browser is installed.");
        }
    } else {
        println!("Status: NOT READY");
    }

    Ok(())
}
