//! Extension-to-language resolution.

use serde::Serialize;

/// Languages the dashboard distinguishes for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    CSharp,
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Python,
    Java,
    Css,
    Scss,
    Json,
    Yaml,
    Markdown,
    Sql,
    Go,
    Rust,
    Php,
    Ruby,
    Bash,
    Xml,
    Markup,
    C,
    Cpp,
    #[serde(rename = "text")]
    PlainText,
}

impl Language {
    /// Resolve the language from a file path.
    ///
    /// Uses the suffix after the last `.`, case-insensitively. Unknown
    /// extensions resolve to [`Language::PlainText`].
    pub fn from_filename(filename: &str) -> Self {
        let extension = filename.rsplit('.').next().unwrap_or_default();
        Self::from_extension(extension)
    }

    /// Resolve the language from a bare extension.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "cs" | "csx" | "razor" => Language::CSharp,
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "jsx" => Language::Jsx,
            "ts" => Language::TypeScript,
            "tsx" => Language::Tsx,
            "py" => Language::Python,
            "java" => Language::Java,
            "css" => Language::Css,
            "scss" | "sass" => Language::Scss,
            "json" => Language::Json,
            "yml" | "yaml" => Language::Yaml,
            "md" | "markdown" => Language::Markdown,
            "sql" => Language::Sql,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "php" => Language::Php,
            "rb" => Language::Ruby,
            "sh" | "bash" => Language::Bash,
            "xml" => Language::Xml,
            "html" | "htm" | "vue" | "aspx" => Language::Markup,
            "c" | "h" => Language::C,
            "cpp" => Language::Cpp,
            _ => Language::PlainText,
        }
    }

    /// Stable identifier used on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
            Language::JavaScript => "javascript",
            Language::Jsx => "jsx",
            Language::TypeScript => "typescript",
            Language::Tsx => "tsx",
            Language::Python => "python",
            Language::Java => "java",
            Language::Css => "css",
            Language::Scss => "scss",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Markdown => "markdown",
            Language::Sql => "sql",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Bash => "bash",
            Language::Xml => "xml",
            Language::Markup => "markup",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::PlainText => "text",
        }
    }

    /// Extension under which the bundled syntect grammar is registered.
    pub(crate) fn syntax_extension(&self) -> Option<&'static str> {
        match self {
            Language::CSharp => Some("cs"),
            Language::JavaScript | Language::Jsx => Some("js"),
            Language::TypeScript => Some("ts"),
            Language::Tsx => Some("tsx"),
            Language::Python => Some("py"),
            Language::Java => Some("java"),
            Language::Css => Some("css"),
            Language::Scss => Some("scss"),
            Language::Json => Some("json"),
            Language::Yaml => Some("yaml"),
            Language::Markdown => Some("md"),
            Language::Sql => Some("sql"),
            Language::Go => Some("go"),
            Language::Rust => Some("rs"),
            Language::Php => Some("php"),
            Language::Ruby => Some("rb"),
            Language::Bash => Some("sh"),
            Language::Xml => Some("xml"),
            Language::Markup => Some("html"),
            Language::C => Some("c"),
            Language::Cpp => Some("cpp"),
            Language::PlainText => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_table() {
        assert_eq!(Language::from_filename("file.cs").id(), "csharp");
        assert_eq!(Language::from_filename("Views/Index.razor"), Language::CSharp);
        assert_eq!(Language::from_filename("a/b/c.mjs"), Language::JavaScript);
        assert_eq!(Language::from_filename("page.aspx"), Language::Markup);
        assert_eq!(Language::from_filename("App.vue"), Language::Markup);
        assert_eq!(Language::from_filename("styles.sass"), Language::Scss);
        assert_eq!(Language::from_filename("ci.yml"), Language::Yaml);
        assert_eq!(Language::from_filename("main.h"), Language::C);
    }

    #[test]
    fn test_case_insensitive_and_last_dot() {
        assert_eq!(Language::from_filename("README.MD"), Language::Markdown);
        assert_eq!(Language::from_filename("archive.tar.py"), Language::Python);
        assert_eq!(Language::from_filename("component.test.TSX"), Language::Tsx);
    }

    #[test]
    fn test_unknown_is_plain_text() {
        assert_eq!(Language::from_filename("file.unknownext"), Language::PlainText);
        assert_eq!(Language::from_filename("Makefile"), Language::PlainText);
        assert_eq!(Language::from_filename(""), Language::PlainText);
        assert_eq!(Language::PlainText.id(), "text");
        assert_eq!(Language::PlainText.to_string(), "text");
    }
}
