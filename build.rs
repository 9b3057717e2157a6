//! Build script for towr-replay - embeds git commit hash and build date
//!
//! Emits:
//! - `VERGEN_GIT_SHA` with the commit hash (or `unknown` outside a git checkout)
//! - `TOWR_REPLAY_BUILD_DATE` with the build date

use std::process::Command;

/// Get the current date in YYYY-MM-DD format
fn get_build_date() -> String {
    // Use the date command for cross-platform compatibility
    if let Ok(output) = Command::new("date").args(["+%Y-%m-%d"]).output() {
        if output.status.success() {
            return String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
    }
    "unknown".to_string()
}

fn main() {
    println!(
        "cargo:rustc-env=TOWR_REPLAY_BUILD_DATE={}",
        get_build_date()
    );

    use vergen_gitcl::{Emitter, GitclBuilder};

    // Use graceful fallback if git info is unavailable
    let git_result = GitclBuilder::default().sha(true).build();

    let emit_result = match git_result {
        Ok(git) => Emitter::default()
            .add_instructions(&git)
            .and_then(|emitter| emitter.emit()),
        Err(e) => {
            println!("cargo:warning=Failed to configure git info: {}", e);
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
            return;
        }
    };

    if let Err(e) = emit_result {
        // Not in a git repo, or git is missing
        println!("cargo:warning=Failed to get git info: {}", e);
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
    }
}
