//! Command: print version information.

/// Print the modstate version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    let version = option_env!("MODSTATE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("modstate {version}");
}
