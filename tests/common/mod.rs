//! Shared test utilities for tc2sc integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tc2sc::{ConversionError, Converter, ConverterConfig};

/// Small Traditional-to-Simplified table that records its inputs.
#[derive(Default)]
pub struct StubConverter {
    table: HashMap<char, char>,
    calls: Mutex<Vec<String>>,
}

impl StubConverter {
    pub fn new() -> Arc<Self> {
        let table = [('這', '这'), ('確', '确'), ('碼', '码'), ('體', '体'), ('簡', '简'), ('頁', '页')]
            .into_iter()
            .collect();
        Arc::new(Self {
            table,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Converter for StubConverter {
    fn convert(&self, text: &str) -> Result<String, ConversionError> {
        self.calls.lock().unwrap().push(text.to_string());
        Ok(text.chars().map(|c| *self.table.get(&c).unwrap_or(&c)).collect())
    }
}

/// Write `content` to `root` + `id`, creating directories.
pub fn write_doc(root: &Path, id: &str, content: &str) {
    let path = root.join(id.trim_start_matches('/'));
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Read `root` + `id`.
pub fn read_doc(root: &Path, id: &str) -> String {
    std::fs::read_to_string(root.join(id.trim_start_matches('/'))).unwrap()
}

/// Configuration pointing at two temporary roots.
pub fn config(source: &Path, dest: &Path, manifest: &[&str]) -> ConverterConfig {
    ConverterConfig {
        source_root: source.to_path_buf(),
        dest_root: dest.to_path_buf(),
        manifest: manifest.iter().map(|id| id.to_string()).collect(),
        ..Default::default()
    }
}
