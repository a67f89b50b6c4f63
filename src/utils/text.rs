//! Display text helpers
//!
//! Shared by the report formatters and the chatbot templates:
//! - trait identifiers (`drought_resistance`) to display names
//! - thousands separators for genome sizes
//! - minimal HTML escaping

/// Convert a trait identifier to a display name
///
/// `"drought_resistance"` → `"Drought Resistance"`
pub fn humanize_trait(trait_name: &str) -> String {
    trait_name
        .split('_')
        .filter(|w| !w.is_empty())
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character, lowercase the rest
fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => format!(
            "{}{}",
            first.to_uppercase(),
            chars.collect::<String>().to_lowercase()
        ),
    }
}

/// Format a non-negative quantity with comma thousands separators
///
/// Fractions are rounded to the nearest integer.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round().abs() as u64;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if value < 0.0 && rounded > 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// Escape text for inclusion in HTML element content or attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_trait() {
        assert_eq!(humanize_trait("drought_resistance"), "Drought Resistance");
        assert_eq!(humanize_trait("high_yield"), "High Yield");
        assert_eq!(humanize_trait("adaptability"), "Adaptability");
        assert_eq!(humanize_trait(""), "");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(17000.0), "17,000");
        assert_eq!(format_thousands(730.0), "730");
        assert_eq!(format_thousands(1234567.0), "1,234,567");
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(-11900.0), "-11,900");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Wheat × Barley"), "Wheat × Barley");
        assert_eq!(escape_html("<b>\"a\" & 'b'</b>"), "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;");
    }
}
