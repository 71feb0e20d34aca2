//! Server-side rendering of the dashboard pages

pub mod chart;
pub mod page;
pub mod table;

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("S&P <500> \"x\" 'y'"), "S&amp;P &lt;500&gt; &quot;x&quot; &#39;y&#39;");
        assert_eq!(escape("EUR/USD"), "EUR/USD");
    }
}
