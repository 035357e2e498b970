//! Fixed UCI output lines.

/// Identify the engine in response to `uci`.
pub fn print_identity() {
    println!("id name Argent {}", env!("CARGO_PKG_VERSION"));
    println!("id author Argent developers");
    println!("option name Hash type spin default 16 min 1 max 4096");
    println!("uciok");
}

pub fn print_ready() {
    println!("readyok");
}
