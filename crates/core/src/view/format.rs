/// `$78.5M`
pub fn money_millions(value: f64) -> String {
    format!("${value:.1}M")
}

/// `8.9%`
pub fn percent1(value: f64) -> String {
    format!("{value:.1}%")
}

/// `43%`
pub fn percent0(value: f64) -> String {
    format!("{value:.0}%")
}

/// `8.2/10`
pub fn score_of_ten(value: f64) -> String {
    format!("{value:.1}/10")
}

/// First `max_chars` characters followed by `...`, whatever the input length.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
