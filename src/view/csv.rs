//! CSV output
//!
//! `id,affects,title` with the affects list quoted and the title written
//! as-is. Titles containing commas or quotes therefore break the column
//! structure; consumers of this format rely on the exact layout.

use crate::bug::BugRecord;
use std::fmt::Write;

pub const HEADER: &str = "id,affects,title";

pub fn render(bugs: &[BugRecord]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for bug in bugs {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "LP: #{},\"{}\",{}",
            bug.id(),
            bug.affects().join(","),
            bug.title()
        );
    }
    out
}
