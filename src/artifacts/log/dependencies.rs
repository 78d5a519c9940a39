//! File dependencies declared by `import` lines
//!
//! A line whose trimmed text starts with `import ` depends on the last `.`-separated
//! segment of what it imports: `import com.example.Parser` depends on `Parser`.
//! Files are read from the working tree, not from the commit that changed them.

use anyhow::Context;
use std::path::Path;

/// Dependency named by a single source line, if it is an import
pub fn extract_dependency(line: &str) -> Option<String> {
    let imported = line
        .trim()
        .strip_prefix("import ")?
        .trim()
        .trim_end_matches(';')
        .trim_end();

    imported
        .rsplit('.')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Dependencies of `file`, relative to `repository`, in line order
///
/// A path that is not a regular file in the working tree (deleted since, or a
/// submodule) has no dependencies.
pub fn dependencies_in_file(repository: &Path, file: &str) -> anyhow::Result<Vec<String>> {
    let path = repository.join(file);
    if !path.is_file() {
        return Ok(Vec::new());
    }

    let content =
        std::fs::read(&path).with_context(|| format!("Unable to read {}", path.display()))?;

    Ok(String::from_utf8_lossy(&content)
        .lines()
        .filter_map(extract_dependency)
        .collect())
}
