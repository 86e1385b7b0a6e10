use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");
    println!("cargo:rerun-if-changed=../../uploads");

    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap(); // "debug" or "release"

    // OUT_DIR is typically: target/debug/build/backend-xxx/out
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("Could not find target profile directory");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root");

    let source_config = workspace_root.join("config.toml");
    let dest_config = target_dir.join("config.toml");
    if source_config.exists() {
        fs::copy(&source_config, &dest_config)
            .unwrap_or_else(|e| panic!("Failed to copy config.toml: {}", e));
    } else {
        println!(
            "cargo:warning=config.toml not found at {:?}, using default config",
            source_config
        );
    }

    // Иконки категорий раздаются из uploads/ рядом с exe
    let source_uploads = workspace_root.join("uploads");
    let dest_uploads = target_dir.join("uploads");
    if source_uploads.is_dir() {
        fs::create_dir_all(&dest_uploads)
            .unwrap_or_else(|e| panic!("Failed to create {:?}: {}", dest_uploads, e));
        for entry in fs::read_dir(&source_uploads).unwrap() {
            let entry = entry.unwrap();
            if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                fs::copy(entry.path(), dest_uploads.join(entry.file_name()))
                    .unwrap_or_else(|e| panic!("Failed to copy {:?}: {}", entry.path(), e));
            }
        }
    } else {
        println!("cargo:warning=uploads not found at {:?}", source_uploads);
    }
}
