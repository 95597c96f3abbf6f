//! Build script to generate the image manifest for WASM builds
//!
//! Scans assets/images/ recursively and lists every directory holding PNGs
//! together with its files, since WASM can't enumerate directories at runtime.

use std::fs;
use std::io::Write;
use std::path::Path;

fn collect_sets(root: &Path, dir: &Path, manifest: &mut String) {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let images: Vec<String> = entries
        .iter()
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext.to_ascii_lowercase() == "png")
                .unwrap_or(false)
        })
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();

    // Loose images at the root (background) are loaded by name
    if dir != root && !images.is_empty() {
        let set = dir
            .strip_prefix(root)
            .unwrap()
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/");

        // Set header: [set/name]
        manifest.push_str(&format!("[{}]\n", set));
        for image in images {
            manifest.push_str(&format!("{}\n", image));
        }
        manifest.push('\n');
    }

    for entry in entries.iter().filter(|e| e.path().is_dir()) {
        collect_sets(root, &entry.path(), manifest);
    }
}

fn main() {
    println!("cargo:rerun-if-changed=assets/images");

    let images_dir = Path::new("assets/images");
    let manifest_path = images_dir.join("manifest.txt");

    let mut manifest = String::new();

    if images_dir.exists() {
        collect_sets(images_dir, images_dir, &mut manifest);

        // Write manifest file
        let mut file = fs::File::create(manifest_path).unwrap();
        file.write_all(manifest.as_bytes()).unwrap();
    }
}
