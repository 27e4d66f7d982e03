use std::path::{Component, Path, PathBuf};

use crate::foundation::error::{TsgError, TsgResult};

/// Fetches the bytes behind a resource reference on behalf of a widget.
pub trait AssetSearcher: Send + Sync {
    /// Resolve `uri` and return its contents.
    fn search(&self, uri: &str) -> TsgResult<Vec<u8>>;
}

/// Resolves relative paths against an ordered list of local directories.
#[derive(Clone, Debug, Default)]
pub struct LocalSearcher {
    roots: Vec<PathBuf>,
}

impl LocalSearcher {
    /// Searcher over `roots`, tried in order.
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            roots: roots.into_iter().collect(),
        }
    }

    /// Append another search root.
    pub fn push_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    /// Search roots in lookup order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl AssetSearcher for LocalSearcher {
    fn search(&self, uri: &str) -> TsgResult<Vec<u8>> {
        let rel = normalize_rel_path(uri)?;
        for root in &self.roots {
            let candidate = root.join(&rel);
            if candidate.is_file() {
                return Ok(std::fs::read(&candidate)?);
            }
        }
        Err(TsgError::validation(format!(
            "resource '{uri}' not found in {} search root(s)",
            self.roots.len()
        )))
    }
}

/// Reject absolute paths and `..` traversal; normalise separators to `/`.
pub fn normalize_rel_path(uri: &str) -> TsgResult<PathBuf> {
    let uri = uri.replace('\\', "/");
    let path = Path::new(&uri);
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::Normal(p) => out.push(p),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(TsgError::validation(format!(
                    "resource path '{uri}' must be relative and stay inside its search root"
                )));
            }
        }
    }
    if out.as_os_str().is_empty() {
        return Err(TsgError::validation("resource path must be non-empty"));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/search.rs"]
mod tests;
