use morte_core::{DiagnosticSink, MemorySink};
use morte_engine::{CheckConfig, ReconciliationEngine};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

#[allow(dead_code)]
pub const FILES: &[&str] = &["foo/file1", "bar/file2"];

#[allow(dead_code)]
/// A run directory and a reference directory under one temp root
pub struct Fixture {
    pub root: TempDir,
    pub sink: MemorySink,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
            sink: MemorySink::new(),
        }
    }

    pub fn base(&self) -> PathBuf {
        self.root.path().join("base")
    }

    pub fn reference(&self) -> PathBuf {
        self.root.path().join("reference")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.reference().join("manifest.yaml")
    }

    pub fn config(&self) -> CheckConfig {
        CheckConfig::new(self.reference(), FILES.iter().copied())
    }

    pub fn engine(&self) -> ReconciliationEngine {
        let sink: Arc<dyn DiagnosticSink> = Arc::new(self.sink.clone());
        ReconciliationEngine::new(&self.config(), &self.base())
            .unwrap()
            .with_sink(sink)
    }

    /// Write the model output `rel` with content derived from `seed`
    pub fn write_output(&self, rel: &str, seed: u8) {
        write_file(&self.base(), rel, &pattern(seed));
    }

    /// Write the reference copy of `rel` with content derived from `seed`
    pub fn write_reference(&self, rel: &str, seed: u8) {
        write_file(&self.reference(), rel, &pattern(seed));
    }

    /// Both declared outputs, identical in the run and the reference tree
    pub fn identical_trees(&self) {
        for (i, f) in FILES.iter().enumerate() {
            self.write_output(f, i as u8);
            self.write_reference(f, i as u8);
        }
    }

    pub fn manifest_text(&self) -> String {
        fs::read_to_string(self.manifest_path()).unwrap()
    }
}

#[allow(dead_code)]
pub fn write_file(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

#[allow(dead_code)]
/// Fixed 4 KiB pattern; distinct seeds give distinct bytes
pub fn pattern(seed: u8) -> Vec<u8> {
    (0..4096u32)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed.wrapping_mul(97)) ^ seed)
        .collect()
}

#[allow(dead_code)]
pub fn strings(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}
