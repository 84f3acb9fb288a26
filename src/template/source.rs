// ABOUTME: Backing stores that hold template source fragments
// ABOUTME: Provides a filesystem directory source and an in-memory source behind one trait

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// A flat, filesystem-like store of template fragments addressed by file name.
pub trait FragmentSource: Send + Sync {
    /// Read the full source text of one fragment
    fn read(&self, file_name: &str) -> io::Result<String>;

    /// List the file names ending in `suffix`, sorted lexically
    fn list(&self, suffix: &str) -> io::Result<Vec<String>>;

    /// Human readable location used in diagnostics
    fn describe(&self) -> String;
}

/// Fragments stored as regular files directly inside one directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FragmentSource for DirSource {
    fn read(&self, file_name: &str) -> io::Result<String> {
        fs::read_to_string(self.root.join(file_name))
    }

    fn list(&self, suffix: &str) -> io::Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            // metadata follows symlinks; dangling links are skipped
            match fs::metadata(entry.path()) {
                Ok(metadata) if metadata.is_file() => {}
                _ => continue,
            }

            // Non UTF-8 names can never be addressed by a template name
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(suffix) && name.len() > suffix.len() {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Fragments held in memory, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fragment(mut self, file_name: &str, source: &str) -> Self {
        self.insert(file_name, source);
        self
    }

    pub fn insert(&mut self, file_name: &str, source: &str) {
        self.files.insert(file_name.to_string(), source.to_string());
    }

    pub fn remove(&mut self, file_name: &str) -> bool {
        self.files.remove(file_name).is_some()
    }
}

impl FragmentSource for MemorySource {
    fn read(&self, file_name: &str) -> io::Result<String> {
        self.files.get(file_name).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no fragment named {}", file_name),
            )
        })
    }

    fn list(&self, suffix: &str) -> io::Result<Vec<String>> {
        // BTreeMap keys are already sorted
        Ok(self
            .files
            .keys()
            .filter(|name| name.ends_with(suffix) && name.len() > suffix.len())
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
