use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Hash everything under `static/` into STATIC_HASH, used as a cache-busting
/// query string on asset links.
fn main() {
    println!("cargo:rerun-if-changed=static/");
    println!("cargo:rerun-if-changed=migrations/");

    let mut files: Vec<PathBuf> = fs::read_dir("static")
        .map(|dir| dir.filter_map(|e| e.ok()).map(|e| e.path()).filter(|p| p.is_file()).collect())
        .unwrap_or_default();
    files.sort();

    let mut hasher = DefaultHasher::new();
    for path in &files {
        if let Ok(contents) = fs::read(path) {
            path.file_name().hash(&mut hasher);
            contents.hash(&mut hasher);
        }
    }

    let hash = format!("{:016x}", hasher.finish());
    println!("cargo:rustc-env=STATIC_HASH={}", &hash[..8]);
}
