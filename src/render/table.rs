//! Boxed dump of every stored game.

use crate::core::data::{GameResult, StatColumn};

pub const RAW_HEADERS: [&str; 3] = ["Game number", "Number of Guesses", "Time to win"];

fn rule(widths: &[usize], corner: char) -> String {
    let mut line = String::new();
    line.push(corner);
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push(corner);
    }
    line
}

/// psql-style table, numbers right-aligned under their headers.
#[must_use]
pub fn render_raw_table(rows: &[GameResult]) -> String {
    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|r| StatColumn::ALL.map(|c| c.format_cell(r)))
        .collect();

    let mut widths = RAW_HEADERS.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let border = rule(&widths, '+');
    let mut lines = vec![border.clone()];

    let head: Vec<String> = RAW_HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| format!(" {h:<w$} "))
        .collect();
    lines.push(format!("|{}|", head.join("|")));
    lines.push(rule(&widths, '|'));

    for row in &cells {
        let body: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(c, w)| format!(" {c:>w$} "))
            .collect();
        lines.push(format!("|{}|", body.join("|")));
    }
    lines.push(border);
    lines.join("\n")
}
