use regex::Regex;
use std::sync::OnceLock;

/// Title and tags read from the first two lines of a document.
///
/// ```text
/// # Shell tricks
/// [shell, cli | unix]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub title: Option<String>,
    /// `None` when the second line is not a bracketed list at all.
    pub tags: Option<Vec<String>>,
}

impl Header {
    pub const LINES: usize = 2;

    pub fn extract(first: Option<&str>, second: Option<&str>) -> Self {
        Self {
            title: first.and_then(parse_title),
            tags: second.and_then(parse_tags),
        }
    }

    /// True when either the title line or the tag line matched.
    pub fn has_metadata(&self) -> bool {
        self.title.is_some() || self.tags.is_some()
    }

    /// Header lines are only consumed when they actually carried metadata.
    pub fn lines_to_skip(&self) -> usize {
        if self.has_metadata() { Self::LINES } else { 0 }
    }

    pub fn title_or(&self, fallback: &str) -> String {
        self.title.clone().unwrap_or_else(|| fallback.to_string())
    }

    pub fn tags(&self) -> Vec<String> {
        self.tags.clone().unwrap_or_default()
    }
}

fn title_regex() -> &'static Regex {
    static TITLE_REGEX: OnceLock<Regex> = OnceLock::new();
    TITLE_REGEX.get_or_init(|| Regex::new(r"^#+\s*(\S.*)$").expect("Invalid title regex"))
}

fn tag_list_regex() -> &'static Regex {
    static TAG_LIST_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_LIST_REGEX.get_or_init(|| Regex::new(r"^\s*\[(.+)\]\s*$").expect("Invalid tag list regex"))
}

fn tag_separator_regex() -> &'static Regex {
    static TAG_SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_SEPARATOR_REGEX
        .get_or_init(|| Regex::new(r"[\s,|]+").expect("Invalid tag separator regex"))
}

fn parse_title(line: &str) -> Option<String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let caps = title_regex().captures(line)?;
    Some(caps[1].trim_end().to_string())
}

fn parse_tags(line: &str) -> Option<Vec<String>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let caps = tag_list_regex().captures(line)?;

    let mut tags: Vec<String> = Vec::new();
    for tag in tag_separator_regex().split(&caps[1]) {
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    Some(tags)
}
