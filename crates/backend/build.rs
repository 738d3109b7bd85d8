use std::path::{Path, PathBuf};
use std::{env, fs};

/// `target/<profile>` directory the backend binary lands in
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    let Some(target) = profile_dir() else {
        println!("cargo:warning=profile directory not found, config.toml not copied");
        return;
    };

    if source.exists() {
        if let Err(e) = fs::copy(&source, target.join("config.toml")) {
            println!("cargo:warning=failed to copy config.toml: {}", e);
        }
    } else {
        println!("cargo:warning=no config.toml at workspace root, the embedded default applies");
    }
}
