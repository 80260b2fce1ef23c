//! Grid table for humans
//!
//! ```text
//! +-----------+----------------+---------------------+
//! | id        | affects        | title               |
//! +===========+================+=====================+
//! | LP: #1234 | cloud-init (U) | boot hangs on ...   |
//! +-----------+----------------+---------------------+
//! ```

use crate::bug::BugRecord;
use unicode_width::UnicodeWidthStr;

/// Columns that always exist: 4 for `|` borders, 6 for padding around
/// content and 12 for `LP: #1234567`
const WIDTH_TABLE: usize = 22;

/// Width the affects column wraps at
const WIDTH_AFFECTS: usize = 20;

/// Narrowest terminal the layout assumes
const MIN_COLUMNS: usize = 80;

const TITLE_MAX_LINES: usize = 4;
const TITLE_PLACEHOLDER: &str = " [...]";
const AFFECTS_INDENT: &str = "    ";

const HEADERS: [&str; 3] = ["id", "affects", "title"];

/// Width the title column wraps at for a terminal `columns` wide
pub fn title_width(columns: u16) -> usize {
    usize::from(columns).max(MIN_COLUMNS) - WIDTH_AFFECTS - WIDTH_TABLE
}

/// Shorten the well-known distribution suffixes
pub fn abbreviate(target: &str) -> String {
    target.replace("(Ubuntu)", "(U)").replace("(Debian)", "(D)")
}

fn affects_cell(bug: &BugRecord) -> String {
    let options = textwrap::Options::new(WIDTH_AFFECTS).subsequent_indent(AFFECTS_INDENT);
    bug.affects()
        .iter()
        .map(|target| textwrap::fill(&abbreviate(target), &options))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap a title to `width`, keeping at most four lines
fn title_cell(title: &str, width: usize) -> String {
    let lines = textwrap::wrap(title, width);
    if lines.len() <= TITLE_MAX_LINES {
        return lines.join("\n");
    }

    let mut kept: Vec<String> = lines[..TITLE_MAX_LINES]
        .iter()
        .map(|line| line.to_string())
        .collect();

    if let Some(last) = kept.last_mut() {
        let mut base = last.trim_end().to_string();
        while !base.is_empty() && base.width() + TITLE_PLACEHOLDER.width() > width {
            base = match base.rsplit_once(' ') {
                Some((head, _)) => head.trim_end().to_string(),
                None => String::new(),
            };
        }
        *last = if base.is_empty() {
            TITLE_PLACEHOLDER.trim_start().to_string()
        } else {
            format!("{}{}", base, TITLE_PLACEHOLDER)
        };
    }

    kept.join("\n")
}

fn cell_width(cell: &str) -> usize {
    cell.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

fn separator(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat(fill).take(width + 2));
        line.push('+');
    }
    line
}

fn row_lines(cells: &[String], widths: &[usize]) -> Vec<String> {
    let split: Vec<Vec<&str>> = cells.iter().map(|cell| cell.lines().collect()).collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(0).max(1);

    (0..height)
        .map(|i| {
            let mut line = String::from("|");
            for (column, width) in split.iter().zip(widths) {
                let text = column.get(i).copied().unwrap_or("");
                line.push(' ');
                line.push_str(text);
                line.push_str(&" ".repeat(width - text.width()));
                line.push_str(" |");
            }
            line
        })
        .collect()
}

/// Render `bugs` as a grid table fitted to a terminal `columns` wide
pub fn render(bugs: &[BugRecord], columns: u16) -> String {
    let width_title = title_width(columns);

    let rows: Vec<Vec<String>> = bugs
        .iter()
        .map(|bug| {
            vec![
                format!("LP: #{}", bug.id()),
                affects_cell(bug),
                title_cell(bug.title(), width_title),
            ]
        })
        .collect();
    let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();

    let widths: Vec<usize> = (0..HEADERS.len())
        .map(|column| {
            rows.iter()
                .map(|row| cell_width(&row[column]))
                .chain(std::iter::once(cell_width(&headers[column])))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = vec![separator(&widths, '-')];
    lines.extend(row_lines(&headers, &widths));
    lines.push(separator(&widths, '='));
    for row in &rows {
        lines.extend(row_lines(row, &widths));
        lines.push(separator(&widths, '-'));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
