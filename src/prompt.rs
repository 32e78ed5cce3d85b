use std::sync::LazyLock;

use regex::Regex;

/// Review instructions sent ahead of the code.
pub const REVIEW_PROMPT: &str = include_str!("rsc/review_prompt.txt");

/// Separates the instructions from the code under review.
pub const CODE_DELIMITER: &str = "-------------------------------";

static LINE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(.)").expect("static regex"));

/// Indents each non-empty line of `text` by two spaces.
pub fn indent(text: &str) -> String {
    LINE_START.replace_all(text, "  ${1}").into_owned()
}

/// Embeds `code` verbatim after the indented review instructions.
pub fn build_prompt(code: &str) -> String {
    format!("\n{}\n  {}\n  {}\n  ", indent(REVIEW_PROMPT), CODE_DELIMITER, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_follows_delimiter_verbatim() {
        let code = "fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n";
        let prompt = build_prompt(code);

        let after = prompt.split_once(CODE_DELIMITER).unwrap().1;
        assert_eq!(after, format!("\n  {}\n  ", code));
    }

    #[test]
    fn test_code_containing_delimiter_and_format_braces() {
        let code = "{} {0} %s\n-------------------------------\n";
        let prompt = build_prompt(code);
        assert!(prompt.ends_with(&format!("{}\n  {}\n  ", CODE_DELIMITER, code)));
        assert!(prompt.starts_with("\n  Act as a seasoned Principal Software Engineer"));
    }

    #[test]
    fn test_template_lists_all_focus_areas() {
        for area in [
            "Bugs and Edge Cases",
            "Best Practices & Idiomatic Code",
            "Performance and Efficiency",
            "Readability & Maintainability",
            "Refactoring Opportunities",
            "Security",
        ] {
            assert!(REVIEW_PROMPT.contains(area), "missing focus area: {}", area);
        }
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\nb\n\nc"), "  a\n  b\n\n  c");
    }

    #[test]
    fn test_instructions_are_indented_like_a_heredoc() {
        let prompt = build_prompt("x");
        assert!(prompt.contains("\n\n  Analyze the following code snippet"));
        assert!(prompt.contains("\n  6.  **Security:**"));
        assert!(prompt.contains("reviewed:\n  -------------------------------\n  x\n  "));
        assert!(!prompt.contains("\n  \n"));
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build_prompt("x"), build_prompt("x"));
    }
}
