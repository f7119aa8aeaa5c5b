use std::path::{Component, Path, PathBuf};

/// Scratch directory tree for one test, rooted under the cargo target
/// tmpdir so test output survives for inspection but never pollutes the
/// source tree.
#[derive(Debug, Clone)]
pub struct TestFs {
    root: PathBuf,
}

#[allow(unused)]
impl TestFs {
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let mut root = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("idl2def");
        root.push(normalize(path.as_ref()));
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn create_dir_all(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::create_dir_all(self.join_path(path))
    }

    pub fn write(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> std::io::Result<()> {
        std::fs::write(self.join_path(path), contents)
    }

    pub fn read_to_string(&self, path: impl AsRef<Path>) -> std::io::Result<String> {
        std::fs::read_to_string(self.join_path(path))
    }

    pub fn join_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(normalize(path.as_ref()))
    }
}

fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.as_ref().components() {
        match component {
            Component::ParentDir => {
                if !normalized.pop() {
                    panic!("path normalization traversed outside of root");
                }
            }
            Component::Normal(p) => {
                normalized.push(p);
            }
            _ => continue,
        }
    }

    normalized
}
