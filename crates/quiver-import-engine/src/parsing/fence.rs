use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// A line that starts or ends a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fence<'a> {
    /// ```` ```lang ````: the tag follows the backticks with no whitespace.
    Open { language: &'a str },
    /// A bare ```` ``` ````.
    Close,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    /// Checks whether `line` is a fence boundary.
    ///
    /// This is a purely line-local test and does not know whether the
    /// scanner is inside a code block, so a code line that itself starts
    /// with ```` ```word ```` reads as a new opening fence.
    pub fn detect(line: &str) -> Option<Fence<'_>> {
        let caps = fence_regex().captures(line)?;
        Some(match caps.get(1) {
            Some(language) => Fence::Open {
                language: language.as_str(),
            },
            None => Fence::Close,
        })
    }
}

fn fence_regex() -> &'static Regex {
    static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
    FENCE_REGEX.get_or_init(|| Regex::new(r"^```(\S+)?").expect("Invalid fence regex"))
}

/// Maps fence tags onto the language names Quiver's code cells understand.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageAliases(BTreeMap<String, String>);

impl LanguageAliases {
    pub fn builtin() -> Self {
        Self(BTreeMap::from([("bash".to_string(), "sh".to_string())]))
    }

    /// The built-in table with `extra` layered on top.
    pub fn with_extra<I, K, V>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut aliases = Self::builtin();
        aliases
            .0
            .extend(extra.into_iter().map(|(k, v)| (k.into(), v.into())));
        aliases
    }

    /// The alias for `tag`, or `tag` itself when it has none.
    pub fn resolve<'a>(&'a self, tag: &'a str) -> &'a str {
        self.0.get(tag).map(String::as_str).unwrap_or(tag)
    }
}

impl Default for LanguageAliases {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("```python\n", Some(Fence::Open { language: "python" }))]
    #[case("```rust", Some(Fence::Open { language: "rust" }))]
    #[case("```c++\r\n", Some(Fence::Open { language: "c++" }))]
    #[case("```python extra words\n", Some(Fence::Open { language: "python" }))]
    #[case("```\n", Some(Fence::Close))]
    #[case("```", Some(Fence::Close))]
    #[case("``` python\n", Some(Fence::Close))]
    #[case("``not a fence\n", None)]
    #[case("text with ```inline``` backticks\n", None)]
    #[case("  ```indented\n", None)]
    #[case("~~~\n", None)]
    fn detect_fences(#[case] line: &str, #[case] expected: Option<Fence>) {
        assert_eq!(CodeFence::detect(line), expected);
    }

    #[test]
    fn bash_maps_to_sh() {
        let aliases = LanguageAliases::default();
        assert_eq!(aliases.resolve("bash"), "sh");
    }

    #[test]
    fn unknown_tags_pass_through() {
        let aliases = LanguageAliases::default();
        assert_eq!(aliases.resolve("python"), "python");
    }

    #[test]
    fn extra_aliases_layer_over_builtin() {
        let aliases = LanguageAliases::with_extra([("js", "javascript"), ("bash", "shell")]);

        assert_eq!(aliases.resolve("js"), "javascript");
        assert_eq!(aliases.resolve("bash"), "shell");
        assert_eq!(aliases.resolve("go"), "go");
    }
}
