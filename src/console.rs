//! 端末への表示
//!
//! 一覧表、空状態、フィードバック、読み込み中スピナー。

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use lifeline_admin_common::{Feedback, Page, PageState, Resource, Severity};

/// 読み込み中の表示
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub fn format_feedback(feedback: &Feedback) -> String {
    let mark = match feedback.severity {
        Severity::Success => "✔",
        Severity::Error => "✖",
        Severity::Info => "ℹ",
    };
    format!("{} {}", mark, feedback.message)
}

/// ID列 + リソースの列で表を組む
pub fn render_table(headers: &[&str], rows: &[(String, Vec<String>)]) -> String {
    let mut widths: Vec<usize> = std::iter::once("ID")
        .chain(headers.iter().copied())
        .map(|h| h.chars().count())
        .collect();

    for (id, cells) in rows {
        widths[0] = widths[0].max(id.chars().count());
        for (i, cell) in cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(i + 1) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join(" │ ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(std::iter::once("ID").chain(headers.iter().copied()).collect()));
    out.push(
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─"),
    );
    for (id, cells) in rows {
        out.push(line(
            std::iter::once(id.as_str())
                .chain(cells.iter().map(String::as_str))
                .collect(),
        ));
    }
    out.join("\n")
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{}{}", cell, " ".repeat(width.saturating_sub(len)))
}

/// ページ全体を文字列に
pub fn render_page<R: Resource>(page: &Page<R>) -> String {
    let mut out = vec![format!("■ {}", R::KIND.title())];

    if let Some(feedback) = page.feedback() {
        out.push(format_feedback(feedback));
    }

    match page.state() {
        PageState::Loading => out.push("読み込み中...".to_string()),
        PageState::Empty => {
            out.push(R::KIND.empty_message());
            out.push(format!(
                "`lifeline-admin create {}` で追加できます",
                R::KIND.name()
            ));
        }
        _ => {
            out.push(render_table(R::columns(), &page.rows()));
            out.push(format!("{}件", page.records().len()));
        }
    }

    out.join("\n")
}

pub fn print_page<R: Resource>(page: &Page<R>) {
    println!("{}\n", render_page(page));
}
