//! Shared helper functions for CLI commands

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Counts characters rather than bytes so unit symbols like `Ω` never
/// split mid-codepoint.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// "1 row" / "3 rows"
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("ΩΩΩΩΩΩ", 5), "ΩΩ...");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "row"), "1 row");
        assert_eq!(pluralize(0, "row"), "0 rows");
        assert_eq!(pluralize(2, "error"), "2 errors");
    }
}
