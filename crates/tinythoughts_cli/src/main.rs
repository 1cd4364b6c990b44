//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tinythoughts_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("tinythoughts_core ping={}", tinythoughts_core::ping());
    println!(
        "tinythoughts_core version={}",
        tinythoughts_core::core_version()
    );
}
