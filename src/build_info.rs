//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `0.1.0 (abc1234, 2026-01-01, release)`, shown in the title bar and simulator banner.
pub fn version_line() -> String {
    format!(
        "{} ({}, {}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE,
        BUILD_PROFILE
    )
}
