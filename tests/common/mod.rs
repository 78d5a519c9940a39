#![allow(dead_code)]

pub mod command;
pub mod store;

/// Node name as it appears between quotes in the emitted diagram
pub fn diagram_label(kind: &str, oid: &str, entry_name: Option<&str>) -> String {
    match entry_name {
        Some(name) => format!("[{kind}]\\n{}\\n{name}", &oid[..6]),
        None => format!("[{kind}]\\n{}", &oid[..6]),
    }
}

pub fn diagram_edge(parent: &str, child: &str) -> String {
    format!("\"{parent}\" --> \"{child}\"")
}

/// Full diagram text for the given edge lines, without a trailing newline
pub fn diagram(edges: &[String]) -> String {
    let mut lines = vec![
        "@startuml".to_string(),
        "skinparam defaultFontName Courier".to_string(),
    ];
    lines.extend(edges.iter().cloned());
    lines.push("@enduml".to_string());
    lines.join("\n")
}
