//! Plain-text filters used by the normalizer

use crate::config::ScriptRange;
use regex::Regex;

/// Character class of the script the pipeline keeps
///
/// Everything outside the class counts as foreign. A run of foreign
/// characters longer than the configured limit is treated as boilerplate
/// (menus, cookie banners, footers in another language) and removed, while
/// short inline foreign tokens survive.
#[derive(Debug, Clone)]
pub struct ScriptClass {
    long_run: Regex,
}

impl ScriptClass {
    /// Build a class from inclusive code point ranges
    ///
    /// Runs of more than `max_run` foreign characters are matched. An empty
    /// range list makes every character foreign.
    pub fn new(ranges: &[ScriptRange], max_run: usize) -> Result<Self, regex::Error> {
        let min = max_run + 1;
        let pattern = if ranges.is_empty() {
            format!("(?s:.){{{},}}", min)
        } else {
            let class: String = ranges
                .iter()
                .map(|r| format!("\\x{{{:X}}}-\\x{{{:X}}}", r.start, r.end))
                .collect();
            format!("[^{}]{{{},}}", class, min)
        };

        Ok(Self {
            long_run: Regex::new(&pattern)?,
        })
    }

    /// Remove every foreign run longer than the limit
    pub fn remove_long_runs(&self, text: &str) -> String {
        self.long_run.replace_all(text, "").into_owned()
    }
}

/// Remove runs of non-CJK characters longer than `max_run`
pub fn remove_foreign_runs(text: &str, max_run: usize) -> String {
    match ScriptClass::new(&[ScriptRange::cjk()], max_run) {
        Ok(class) => class.remove_long_runs(text),
        Err(_) => text.to_string(),
    }
}

/// Remove lines whose trimmed length is below `min_len` characters
pub fn remove_short_lines(text: &str, min_len: usize) -> String {
    text.split('\n')
        .filter(|line| line.trim().chars().count() >= min_len)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_inline_tokens_survive() {
        assert_eq!(remove_foreign_runs("我觉得abc很开心", 20), "我觉得abc很开心");
    }

    #[test]
    fn test_long_runs_removed() {
        let s = "today is a very happy day ,我觉得abc很开心， jkls;djfkl;ajskl;jfkl;aefefefe";
        assert_eq!(remove_foreign_runs(s, 20), "我觉得abc很开心");
    }

    #[test]
    fn test_run_boundary() {
        let twenty = "a".repeat(20);
        let twenty_one = "a".repeat(21);
        assert_eq!(
            remove_foreign_runs(&format!("中{}文", twenty), 20),
            format!("中{}文", twenty)
        );
        assert_eq!(remove_foreign_runs(&format!("中{}文", twenty_one), 20), "中文");
    }

    #[test]
    fn test_sentence_inside_chinese_removed() {
        let s = "他说：Rust is a systems programming language.然后离开了";
        // The full-width colon is outside the CJK block and joins the run
        assert_eq!(remove_foreign_runs(s, 20), "他说然后离开了");
    }

    #[test]
    fn test_remove_short_lines() {
        let keep_exact = "x".repeat(35);
        let keep_long = "y".repeat(50);
        let input = format!(
            "Home\n{}\n   About us   \n\n  {}  \n{}",
            keep_exact,
            keep_long,
            "z".repeat(34)
        );
        let output = remove_short_lines(&input, 35);
        assert_eq!(output, format!("{}\n  {}  ", keep_exact, keep_long));
    }

    #[test]
    fn test_remove_short_lines_counts_chars() {
        // Ten CJK characters are thirty bytes but ten characters
        let line = "一二三四五六七八九十";
        assert_eq!(remove_short_lines(line, 10), line);
        assert_eq!(remove_short_lines(line, 11), "");
    }

    #[test]
    fn test_custom_ranges() {
        let class = ScriptClass::new(&[ScriptRange::new(0x3040, 0x30FF)], 3).unwrap();
        assert_eq!(class.remove_long_runs("ひらがなabcdカタカナab"), "ひらがなカタカナab");
    }

    #[test]
    fn test_empty_ranges_make_everything_foreign() {
        let class = ScriptClass::new(&[], 3).unwrap();
        assert_eq!(class.remove_long_runs("abc"), "abc");
        assert_eq!(class.remove_long_runs("abcd"), "");
    }
}
