use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// target/<profile>, где лежит собранный бинарник
fn profile_dir() -> Option<PathBuf> {
    let out_dir = env::var("OUT_DIR").ok()?;
    let profile = env::var("PROFILE").ok()?;
    Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let Some(workspace_root) = Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2) else {
        return;
    };
    let source = workspace_root.join("config.toml");
    if !source.exists() {
        println!("cargo:warning=config.toml not found, backend will use the embedded default");
        return;
    }

    let Some(target) = profile_dir() else {
        println!("cargo:warning=cannot resolve target profile directory, config.toml not copied");
        return;
    };

    // load_config ищет config.toml рядом с исполняемым файлом
    if let Err(e) = fs::copy(&source, target.join("config.toml")) {
        println!("cargo:warning=failed to copy config.toml: {}, backend will use the embedded default", e);
    }
}
