//! Narrative text formatting

/// Story text prepared for the narrative panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedText {
    /// `<p>` blocks with escaped text, `<strong>` emphasis and `<br/>` line breaks
    pub html: String,
    /// Plain paragraphs, trimmed
    pub paragraphs: Vec<String>,
}

/// Split on blank lines, escape everything, then apply `**emphasis**`
pub fn format_story_text(raw: &str) -> FormattedText {
    let paragraphs = split_paragraphs(raw.trim());

    let html: String = paragraphs
        .iter()
        .map(|p| {
            let safe = emphasize(&escape_html(p)).replace('\n', "<br/>");
            format!("<p>{safe}</p>")
        })
        .collect();

    FormattedText {
        html: if html.is_empty() {
            "<p></p>".to_string()
        } else {
            html
        },
        paragraphs,
    }
}

fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut current, &mut paragraphs);
        } else {
            current.push(line);
        }
    }
    flush(&mut current, &mut paragraphs);
    paragraphs
}

fn flush(lines: &mut Vec<&str>, paragraphs: &mut Vec<String>) {
    let paragraph = lines.join("\n").trim().to_string();
    if !paragraph.is_empty() {
        paragraphs.push(paragraph);
    }
    lines.clear();
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// `**x**` to `<strong>x</strong>`; the emphasized run is non-empty and stays on one line
fn emphasize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find("**") {
        let after = &rest[open + 2..];
        match after.find("**") {
            Some(close) if close > 0 && !after[..close].contains('\n') => {
                out.push_str(&rest[..open]);
                out.push_str("<strong>");
                out.push_str(&after[..close]);
                out.push_str("</strong>");
                rest = &after[close + 2..];
            }
            _ => {
                out.push_str(&rest[..open + 2]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
