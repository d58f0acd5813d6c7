use morte_core::HashKind;
use morte_store::StoreLayout;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `bytes` to `root/rel`, creating parent directories
#[allow(dead_code)]
pub fn write_file(root: &Path, rel: &str, bytes: &[u8]) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, bytes).unwrap();
    path
}

/// `base/`, `reference/` and `reference/manifest.yaml` under `root`
#[allow(dead_code)]
pub fn layout(root: &Path, files: &[&str]) -> StoreLayout {
    StoreLayout {
        base_dir: root.join("base"),
        reference_dir: root.join("reference"),
        manifest_path: root.join("reference").join("manifest.yaml"),
        output_files: files.iter().map(|f| f.to_string()).collect(),
        hash_kinds: vec![HashKind::sha256()],
    }
}

/// Count files ending in `.tmp` anywhere below `dir`
#[allow(dead_code)]
pub fn tmp_files_below(dir: &Path) -> usize {
    let mut count = 0;
    let mut stack = vec![dir.to_path_buf()];
    while let Some(d) = stack.pop() {
        for entry in fs::read_dir(&d).unwrap().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.to_string_lossy().ends_with(".tmp") {
                count += 1;
            }
        }
    }
    count
}
