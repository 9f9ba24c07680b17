// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help styling.
//!
//! Colors follow `NO_COLOR=1` (off) and `COLOR=1` (forced on); otherwise
//! they are used only when stdout is a terminal.

use std::io::IsTerminal;

use anstyle::{Ansi256Color, Color, Style};
use clap::builder::styling::Styles;

const HEADER: u8 = 74;
const LITERAL: u8 = 250;
const CONTEXT: u8 = 245;

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

/// Clap styles for `--help` output.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(fg(HEADER))
        .usage(fg(HEADER))
        .literal(fg(LITERAL))
        .placeholder(fg(CONTEXT))
        .valid(fg(CONTEXT))
}

/// Colorize an examples block if colors are enabled.
pub fn examples(text: &str) -> String {
    if should_colorize() {
        colorize_examples(text)
    } else {
        text.to_string()
    }
}

/// Colorize an examples block:
///
/// ```text
/// Examples:
///   wisssh wishes --friend fr0001    Show a friend's wishes
/// ```
///
/// Header lines get the header color, the command part of each example
/// line the literal color. Descriptions are left alone.
pub fn colorize_examples(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 128);
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];

        if trimmed.ends_with(':') && !trimmed.contains("  ") {
            out.push_str(indent);
            out.push_str(&paint(HEADER, trimmed));
        } else if let Some(end) = trimmed.find("  ") {
            out.push_str(indent);
            out.push_str(&paint(LITERAL, &trimmed[..end]));
            out.push_str(&trimmed[end..]);
        } else {
            out.push_str(line);
        }
    }
    out
}

fn paint(code: u8, text: &str) -> String {
    let style = fg(code);
    format!("{}{}{}", style.render(), text, style.render_reset())
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
