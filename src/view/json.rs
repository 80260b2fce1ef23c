//! JSON output: an array of `{"id", "affects", "title"}` objects

use crate::bug::{BugRecord, BugSummary};
use crate::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

const INDENT: &[u8] = b"    ";

pub fn render(bugs: &[BugRecord]) -> Result<String> {
    let summaries: Vec<BugSummary> = bugs.iter().map(BugRecord::to_summary).collect();

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    summaries.serialize(&mut serializer)?;

    let mut out = String::from_utf8(buf)
        .map_err(|e| crate::TriageError::Render(format!("JSON output is not UTF-8: {}", e)))?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bug::AffectedTask;

    #[test]
    fn test_indent_and_key_order() {
        let bugs = vec![BugRecord::new(
            "1",
            "title",
            vec![AffectedTask::new(Some("foo".into()), "foo (Ubuntu)", "bugs/1")],
        )];

        let expected = r#"[
    {
        "id": "1",
        "affects": [
            "foo (Ubuntu)"
        ],
        "title": "title"
    }
]
"#;
        assert_eq!(render(&bugs).unwrap(), expected);
    }

    #[test]
    fn test_non_ascii_is_literal() {
        let bugs = vec![BugRecord::new(
            "2",
            "Übersetzung fehlt — 日本語",
            vec![AffectedTask::new(None, "ü (Ubuntu)", "bugs/2")],
        )];
        let out = render(&bugs).unwrap();
        assert!(out.contains("Übersetzung fehlt — 日本語"));
        assert!(!out.contains("\\u"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(render(&[]).unwrap(), "[]\n");
    }
}
