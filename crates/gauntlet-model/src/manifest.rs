// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Manifest files and problem-class directories.
//!
//! A problem class is a directory holding two manifests, `trainingFiles.txt`
//! and `testingFiles.txt`. Each manifest starts with an integer count followed
//! by that many instance paths, one per line, relative to the class directory.
//! A `classFolder.txt` one level up names the class to run.

use crate::{
    loading::{InstanceLoader, InstanceLoaderError},
    table::FunctionTable,
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    sync::Arc,
};

/// File name of the training manifest inside a class directory.
pub const TRAINING_MANIFEST: &str = "trainingFiles.txt";
/// File name of the testing manifest inside a class directory.
pub const TESTING_MANIFEST: &str = "testingFiles.txt";
/// File naming the active class folder inside the resources directory.
pub const CLASS_FOLDER_FILE: &str = "classFolder.txt";

/// The error type for manifest parsing.
#[derive(Debug)]
pub enum ManifestError {
    Io(std::io::Error),
    /// The manifest has no count line.
    MissingCount,
    /// The count line is not a non-negative integer.
    InvalidCount(String),
    /// Fewer entries than announced by the count line.
    MissingEntries { expected: usize, found: usize },
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingCount => write!(f, "manifest is empty, expected an entry count"),
            Self::InvalidCount(token) => write!(f, "invalid entry count '{token}'"),
            Self::MissingEntries { expected, found } => write!(
                f,
                "manifest announces {expected} entries but lists only {found}"
            ),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ManifestError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// An ordered list of instance paths.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    entries: Vec<String>,
}

impl Manifest {
    /// Parses a manifest. Blank lines are skipped and lines after the
    /// announced entries are ignored.
    pub fn from_bufread<R: BufRead>(rdr: R) -> Result<Self, ManifestError> {
        let mut lines = rdr.lines();

        let mut count_line = None;
        for line in lines.by_ref() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                count_line = Some(trimmed.to_owned());
                break;
            }
        }
        let count_line = count_line.ok_or(ManifestError::MissingCount)?;
        let count_token = count_line.split_whitespace().next().unwrap_or_default();
        let expected: usize = count_token
            .parse()
            .map_err(|_| ManifestError::InvalidCount(count_token.to_owned()))?;

        let mut entries = Vec::new();
        for line in lines {
            if entries.len() == expected {
                break;
            }
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                entries.push(trimmed.to_owned());
            }
        }

        if entries.len() < expected {
            return Err(ManifestError::MissingEntries {
                expected,
                found: entries.len(),
            });
        }

        Ok(Self { entries })
    }

    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        Self::from_bufread(BufReader::new(File::open(path)?))
    }

    #[inline]
    pub fn from_str(s: &str) -> Result<Self, ManifestError> {
        Self::from_bufread(s.as_bytes())
    }

    #[inline]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A decoded instance together with the manifest entry it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTable {
    pub name: String,
    pub table: Arc<FunctionTable>,
}

impl NamedTable {
    #[inline]
    pub fn new<S: Into<String>>(name: S, table: FunctionTable) -> Self {
        Self {
            name: name.into(),
            table: Arc::new(table),
        }
    }
}

/// The error type for opening and loading a problem class.
#[derive(Debug)]
pub enum ProblemClassError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Manifest {
        path: PathBuf,
        source: ManifestError,
    },
    Instance {
        path: PathBuf,
        source: InstanceLoaderError,
    },
}

impl std::fmt::Display for ProblemClassError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Manifest { path, source } => {
                write!(f, "manifest {}: {}", path.display(), source)
            }
            Self::Instance { path, source } => {
                write!(f, "instance {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ProblemClassError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Manifest { source, .. } => Some(source),
            Self::Instance { source, .. } => Some(source),
        }
    }
}

/// A problem-class directory with its two manifests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemClass {
    name: String,
    dir: PathBuf,
    training: Manifest,
    testing: Manifest,
}

impl ProblemClass {
    /// Opens the class named in `<resources>/classFolder.txt`.
    pub fn resolve<P: AsRef<Path>>(resources: P) -> Result<Self, ProblemClassError> {
        let resources = resources.as_ref();
        let path = resources.join(CLASS_FOLDER_FILE);
        let contents = std::fs::read_to_string(&path).map_err(|source| ProblemClassError::Io {
            path: path.clone(),
            source,
        })?;

        let name = contents.lines().map(str::trim).find(|l| !l.is_empty());
        let name = name.ok_or_else(|| ProblemClassError::Manifest {
            path,
            source: ManifestError::MissingCount,
        })?;
        Self::open(resources.join(name))
    }

    /// Opens the class directory `dir`, reading both manifests.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, ProblemClassError> {
        let dir = dir.as_ref().to_path_buf();
        let read = |file: &str| {
            let path = dir.join(file);
            Manifest::from_path(&path)
                .map_err(|source| ProblemClassError::Manifest { path, source })
        };
        let training = read(TRAINING_MANIFEST)?;
        let testing = read(TESTING_MANIFEST)?;

        let name = dir
            .file_name()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| dir.to_string_lossy().into_owned());

        Ok(Self {
            name,
            dir,
            training,
            testing,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[inline]
    pub fn training_manifest(&self) -> &Manifest {
        &self.training
    }

    #[inline]
    pub fn testing_manifest(&self) -> &Manifest {
        &self.testing
    }

    /// Decodes every instance listed in the training manifest.
    pub fn load_training(
        &self,
        loader: &InstanceLoader,
    ) -> Result<Vec<NamedTable>, ProblemClassError> {
        self.load(&self.training, loader)
    }

    /// Decodes every instance listed in the testing manifest.
    pub fn load_testing(
        &self,
        loader: &InstanceLoader,
    ) -> Result<Vec<NamedTable>, ProblemClassError> {
        self.load(&self.testing, loader)
    }

    fn load(
        &self,
        manifest: &Manifest,
        loader: &InstanceLoader,
    ) -> Result<Vec<NamedTable>, ProblemClassError> {
        manifest
            .entries()
            .iter()
            .map(|entry| {
                let path = self.dir.join(entry);
                loader
                    .from_path(&path)
                    .map(|table| NamedTable::new(entry.clone(), table))
                    .map_err(|source| ProblemClassError::Instance { path, source })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_reads_announced_entries() {
        let m = Manifest::from_str("3\na.txt\n\n  b.txt  \nc.txt\nextra.txt\n").unwrap();
        assert_eq!(m.entries(), &["a.txt", "b.txt", "c.txt"]);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_manifest_with_zero_entries() {
        let m = Manifest::from_str("0\n").unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn test_manifest_errors() {
        assert!(matches!(Manifest::from_str(""), Err(ManifestError::MissingCount)));
        assert!(matches!(
            Manifest::from_str("two\na\nb\n"),
            Err(ManifestError::InvalidCount(t)) if t == "two"
        ));
        assert!(matches!(
            Manifest::from_str("3\na\nb\n"),
            Err(ManifestError::MissingEntries {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_manifest_with_oversized_count_reports_missing_entries() {
        assert!(matches!(
            Manifest::from_str("18446744073709551615\na.txt\n"),
            Err(ManifestError::MissingEntries {
                expected: usize::MAX,
                found: 1
            })
        ));
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "gauntlet-model-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_problem_class_resolves_and_loads() {
        let resources = scratch_dir("resolve");
        let class_dir = resources.join("toy");
        std::fs::create_dir_all(&class_dir).unwrap();

        std::fs::write(resources.join(CLASS_FOLDER_FILE), "toy\n").unwrap();
        std::fs::write(class_dir.join(TRAINING_MANIFEST), "1\ntrain0.txt\n").unwrap();
        std::fs::write(class_dir.join(TESTING_MANIFEST), "2\ntest0.txt\ntest1.txt\n").unwrap();
        let instance = "2 10 2 2\n0 1 1 2 3 4\n1 0 5 6 7 8\n";
        for f in ["train0.txt", "test0.txt", "test1.txt"] {
            std::fs::write(class_dir.join(f), instance).unwrap();
        }

        let class = ProblemClass::resolve(&resources).unwrap();
        assert_eq!(class.name(), "toy");
        assert_eq!(class.training_manifest().len(), 1);

        let loader = InstanceLoader::new();
        let testing = class.load_testing(&loader).unwrap();
        assert_eq!(testing.len(), 2);
        assert_eq!(testing[1].name, "test1.txt");
        assert_eq!(testing[0].table.value(&[false, false]), 6.0);

        let _ = std::fs::remove_dir_all(&resources);
    }

    #[test]
    fn test_problem_class_reports_broken_instance_path() {
        let dir = scratch_dir("broken");
        std::fs::write(dir.join(TRAINING_MANIFEST), "0\n").unwrap();
        std::fs::write(dir.join(TESTING_MANIFEST), "1\nmissing.txt\n").unwrap();

        let class = ProblemClass::open(&dir).unwrap();
        match class.load_testing(&InstanceLoader::new()) {
            Err(ProblemClassError::Instance { path, .. }) => {
                assert!(path.ends_with("missing.txt"));
            }
            other => panic!("expected Instance error, got {:?}", other),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
