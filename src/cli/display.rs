// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the docsift CLI.
//!
//! Result pages in a box, documents with their matches lit up, scores colored
//! by how confident the backend was. OneDark for dark terminals, One Light for
//! light ones. Respects `NO_COLOR`, and drops to plain text when stdout is not
//! a TTY so `docsift search ... | grep` sees no escape codes.
//!
//! # Theme detection order
//!
//! 1. `DOCSIFT_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

use docsift::highlight::HighlightSpan;
use docsift::paginate::Page;
use docsift::SearchResult;

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

/// Marker pair used when matches can't be colored.
const PLAIN_OPEN: &str = "**";
const PLAIN_CLOSE: &str = "**";

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("DOCSIFT_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// ONEDARK / ONE LIGHT COLOR PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const UNDERLINE: &str = "\x1b[4m";
}

pub use colors::*;

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);    // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);  // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);    // #61afef
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);    // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);     // #5c6370
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (255, 215, 0);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);     // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);   // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);  // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);   // #4078f2
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);    // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);  // #a0a1a7
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (152, 104, 1);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);
theme_color!(BRIGHT_YELLOW);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Apply modifiers only
pub fn styled(styles: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", styles.join(""), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut `s` to at most `max` chars, ending in `…` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border() -> String {
    if use_colors() {
        GRAY()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = border();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        reset(),
        content,
        " ".repeat(pad),
        border,
        reset()
    );
}

fn labelled_rule(left: char, right: char, label: &str) {
    let border = border();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}{}{}{}{}{}",
        border,
        left,
        reset(),
        label_part,
        border,
        "─".repeat(remaining),
        right,
        reset()
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    labelled_rule('┌', '┐', label);
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    labelled_rule('├', '┤', label);
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", border(), "─".repeat(BOX_WIDTH), reset());
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded relevance score (cosine similarity, so 0..1 in practice)
pub fn score_value(score: f64) -> String {
    let text = format!("{:>7.4}", score);
    if !use_colors() {
        return text;
    }
    let color = if score >= 0.5 {
        BRIGHT_GREEN()
    } else if score >= 0.25 {
        GREEN()
    } else if score >= 0.1 {
        YELLOW()
    } else {
        GRAY()
    };
    format!("{}{}{}", color, text, RESET)
}

/// Document text with matched spans lit up (or wrapped in `**` without color).
///
/// Control characters other than newline and tab are dropped, so escape
/// sequences inside a fetched document never reach the terminal.
pub fn marked(text: &str, spans: &[HighlightSpan]) -> String {
    let (open, close) = if use_colors() {
        (format!("{}{}{}", BOLD, UNDERLINE, BRIGHT_YELLOW()), RESET)
    } else {
        (PLAIN_OPEN.to_string(), PLAIN_CLOSE)
    };

    let mut out = String::with_capacity(text.len());
    for span in spans {
        if span.matched {
            out.push_str(&open);
            out.push_str(&printable(span.text(text)));
            out.push_str(close);
        } else {
            out.push_str(&printable(span.text(text)));
        }
    }
    out
}

/// `s` without control characters, keeping `\n` and `\t`.
pub fn printable(s: &str) -> String {
    s.chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect()
}

pub fn error_line(message: &str) {
    eprintln!("{} {}", themed(RED, &[BOLD], "error:"), message);
}

pub fn notice(message: &str) {
    println!("{} {}", themed(GREEN, &[BOLD], "✓"), message);
}

/// Print one page of results as a box, each row with rank, filename, score
/// and the document link.
pub fn results_page(query: &str, page: &Page<'_>, href: impl Fn(&SearchResult) -> String) {
    section_top(&format!("RESULTS  \"{}\"", truncate(query, 40)));

    if page.total_results == 0 {
        row(&format!("  {}", themed(GRAY, &[], "No results.")));
    }

    for (rank, result) in page.ranked() {
        let name_width = BOX_WIDTH - 18;
        let rank_label = themed(BLUE, &[BOLD], &format!("{:>4}.", rank));
        let name = pad_right(&truncate(&result.filename, name_width), name_width);
        row(&format!(
            " {} {} {}  ",
            rank_label,
            styled(&[BOLD], &name),
            score_value(result.score)
        ));
        let link = truncate(&href(result), BOX_WIDTH - 8);
        row(&format!("       {}", themed(GRAY, &[DIM], &link)));
    }

    section_mid(&format!(
        "PAGE {}/{} · {} results",
        page.number, page.total_pages, page.total_results
    ));
    let mut nav = Vec::new();
    if page.has_prev() {
        nav.push("[p]rev");
    }
    if page.has_next() {
        nav.push("[n]ext");
    }
    if !nav.is_empty() {
        row(&format!("  {}", themed(GRAY, &[], &nav.join("  "))));
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
