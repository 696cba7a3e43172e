//! Build script: embeds version metadata.

use std::process::Command;

fn main() {
    // Prefer MODSTATE_VERSION if set (release builds), otherwise fall back to
    // git describe for local development builds.
    if let Ok(version) = std::env::var("MODSTATE_VERSION") {
        println!("cargo:rustc-env=MODSTATE_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=MODSTATE_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=MODSTATE_VERSION");
}
