//! Build script for simbridge-sys.
//!
//! Without the `link` feature this does nothing. With it, the script
//! configures the linker for the native engine library.
//!
//! # Environment variables
//!
//! - `SIMBRIDGE_LIB_DIR`: Directory containing the pre-built engine library.
//!   Required when the `link` feature is enabled.
//!
//! - `SIMBRIDGE_LIB_NAME`: Library name passed to the linker, without the
//!   `lib` prefix and extension. Defaults to `lsimulacrum`.
//!
//! - `SIMBRIDGE_LINK_KIND`: `dylib` (default) or `static`. Static linking
//!   also pulls in the system libraries the engine's Rust runtime needs.

use std::env;
use std::path::PathBuf;

/// Default library name of the engine (`liblsimulacrum.so` / `.dylib` / `.a`).
const DEFAULT_LIB_NAME: &str = "lsimulacrum";

fn main() {
    println!("cargo:rerun-if-env-changed=SIMBRIDGE_LIB_DIR");
    println!("cargo:rerun-if-env-changed=SIMBRIDGE_LIB_NAME");
    println!("cargo:rerun-if-env-changed=SIMBRIDGE_LINK_KIND");
    println!("cargo:rerun-if-env-changed=DOCS_RS");

    // docs.rs: no native libs.
    if env::var("DOCS_RS").is_ok() {
        return;
    }

    if env::var_os("CARGO_FEATURE_LINK").is_none() {
        return;
    }

    let lib_dir = env::var("SIMBRIDGE_LIB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            panic!("simbridge-sys: the `link` feature requires SIMBRIDGE_LIB_DIR to be set")
        });
    let name = env::var("SIMBRIDGE_LIB_NAME").unwrap_or_else(|_| DEFAULT_LIB_NAME.to_owned());
    let kind = env::var("SIMBRIDGE_LINK_KIND").unwrap_or_else(|_| "dylib".to_owned());
    assert!(
        kind == "dylib" || kind == "static",
        "simbridge-sys: SIMBRIDGE_LINK_KIND must be `dylib` or `static`, got `{kind}`"
    );

    eprintln!("simbridge-sys: linking {kind}={name} from {}", lib_dir.display());
    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib={kind}={name}");
    println!("cargo:LIB_DIR={}", lib_dir.display());

    if kind == "static" {
        link_static_runtime_deps();
    }
}

/// System libraries required by a statically linked Rust engine.
fn link_static_runtime_deps() {
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let libs: &[&str] = match target_os.as_str() {
        "linux" => &["dl", "m", "pthread"],
        "macos" => &["m"],
        "windows" => &["ws2_32", "userenv"],
        _ => &[],
    };
    for lib in libs {
        println!("cargo:rustc-link-lib=dylib={lib}");
    }
}
