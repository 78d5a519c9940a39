//! Per-commit file dependency diagrams
//!
//! ```text
//! @startuml
//! title Commit: <hash>
//! class "<changed file>"
//! ...
//! "<changed file>" --> "<dependency>"
//! ...
//! @enduml
//! ```

use crate::artifacts::diagram::emitter::{DIAGRAM_END, DIAGRAM_START, format_label};
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CommitDependencies {
    pub commit: ObjectId,
    /// Files the commit changed, in `git diff-tree` order
    pub files: Vec<String>,
    /// Dependencies of each changed file that has any, in file order
    pub dependencies: Vec<(String, Vec<String>)>,
}

/// PlantUML text for one commit, lines joined with `\n` and no trailing newline
pub fn emit_dependencies(commit: &CommitDependencies) -> String {
    let mut lines = vec![
        DIAGRAM_START.to_string(),
        format!("title Commit: {}", commit.commit),
    ];

    lines.extend(
        commit
            .files
            .iter()
            .map(|file| format!("class \"{}\"", format_label(file))),
    );

    for (file, dependencies) in &commit.dependencies {
        for dependency in dependencies {
            lines.push(format!(
                "\"{}\" --> \"{}\"",
                format_label(file),
                format_label(dependency)
            ));
        }
    }

    lines.push(DIAGRAM_END.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const COMMIT: &str = "8a1f0c1d3b8d0e59b7d4b0f6f1d0d6f0b2a9c3e4";

    fn commit(files: &[&str], dependencies: &[(&str, &[&str])]) -> CommitDependencies {
        CommitDependencies::new(
            ObjectId::try_parse(COMMIT.to_string()).unwrap(),
            files.iter().map(|file| file.to_string()).collect(),
            dependencies
                .iter()
                .map(|(file, deps)| {
                    (
                        file.to_string(),
                        deps.iter().map(|dep| dep.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_classes_then_dependency_edges() {
        let diagram = emit_dependencies(&commit(
            &["file1.kt", "file2.kt", "file3.kt"],
            &[("file1.kt", &["file2.kt"]), ("file2.kt", &["file3.kt"])],
        ));

        assert_eq!(
            diagram,
            format!(
                "@startuml\n\
                 title Commit: {COMMIT}\n\
                 class \"file1.kt\"\n\
                 class \"file2.kt\"\n\
                 class \"file3.kt\"\n\
                 \"file1.kt\" --> \"file2.kt\"\n\
                 \"file2.kt\" --> \"file3.kt\"\n\
                 @enduml"
            )
        );
    }

    #[test]
    fn test_commit_without_files() {
        assert_eq!(
            emit_dependencies(&commit(&[], &[])),
            format!("@startuml\ntitle Commit: {COMMIT}\n@enduml")
        );
    }

    #[test]
    fn test_quoted_file_names_are_escaped() {
        let diagram = emit_dependencies(&commit(&["say \"hi\".kt"], &[]));

        assert_eq!(diagram.lines().nth(2), Some("class \"say <U+0022>hi<U+0022>.kt\""));
    }
}
