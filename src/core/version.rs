//! Build metadata accessors.
//! Includes the generated version.rs from the build script, providing a single
//! source of truth for startup banners.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Package name as declared in Cargo.toml
pub fn package_name() -> &'static str {
    PACKAGE_NAME
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Cargo profile the binary was built with (`debug` or `release`)
pub fn build_profile() -> &'static str {
    BUILD_PROFILE
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// One-line banner with name, version, git hash, profile and build time
pub fn banner() -> String {
    format!(
        "{} v{} ({}, {} build {})",
        package_name(),
        env!("CARGO_PKG_VERSION"),
        git_hash(),
        build_profile(),
        build_time()
    )
}
