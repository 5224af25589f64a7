//! Locate `/** ... */` blocks in arbitrary source text with a line
//! classifier feeding an accumulator.

use regex::Regex;
use std::sync::LazyLock;

// A comment line: the opener with the rest of its line, a bare closer, or a `*` line.
static RE_COMMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*/\*\*.*|[ \t]*\*/|[ \t]*\*.*)").unwrap());

/// Options for [`scan_comments`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Keep each line's original indentation instead of normalizing it to
    /// the canonical ` * ` layout.
    pub keep_indent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    /// `/** ... */` on one line
    Whole,
    Open,
    Close,
    Inner,
}

fn classify(line: &str) -> LineKind {
    match (line.contains("/**"), line.contains("*/")) {
        (true, true) => LineKind::Whole,
        (true, false) => LineKind::Open,
        (false, true) => LineKind::Close,
        (false, false) => LineKind::Inner,
    }
}

/// Every `/** ... */` block in `file`, in source order.
///
/// Without `keep_indent` the opener is left-trimmed and every following
/// line is re-indented by a single space. Empty input yields no blocks.
pub fn scan_comments(file: &str, opts: ScanOptions) -> Vec<String> {
    let mut output = Vec::new();
    let mut current = String::new();
    let mut in_block = false;

    for line in file.lines() {
        let Some(m) = RE_COMMENT_LINE.find(line) else {
            continue;
        };
        let matched = m.as_str();
        let kind = classify(matched);
        if !in_block && !matches!(kind, LineKind::Whole | LineKind::Open) {
            continue;
        }

        let first = if opts.keep_indent {
            matched.to_string()
        } else {
            matched.trim_start().to_string()
        };
        let following = if opts.keep_indent {
            matched.to_string()
        } else {
            format!(" {}", matched.trim_start())
        };

        match kind {
            LineKind::Whole => {
                output.push(join(&current, &first));
                current.clear();
                in_block = false;
            }
            LineKind::Close => {
                output.push(join(&current, &following));
                current.clear();
                in_block = false;
            }
            LineKind::Open => {
                if !current.is_empty() {
                    tracing::debug!("unterminated comment block joined with the next one");
                }
                current = join(&current, &first);
                in_block = true;
            }
            LineKind::Inner => {
                current = join(&current, &following);
            }
        }
    }

    output
}

fn join(current: &str, line: &str) -> String {
    if current.is_empty() {
        line.to_string()
    } else {
        format!("{}\n{}", current, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = concat!(
        "\n/**\n * The first group\n * \n * @since v1.0.0\n */asdf\nasdf\n",
        "/**\n * The second group\n * \n * @since v1.0.0\n */\nasdf\n",
        "/** The third group */",
    );

    const INDENTED: &str = concat!(
        "        /**\n         * The first group\n         * \n         * @since v1.0.0\n         */asdf\n",
        "        asdf\n",
        "        /**\n         * The second group\n         * \n         * @since v1.0.0\n         */\n",
        "        asdf\n",
        "        /** The third group */",
    );

    fn scan(file: &str) -> Vec<String> {
        scan_comments(file, ScanOptions::default())
    }

    #[test]
    fn nothing() {
        assert!(scan("").is_empty());
        assert_eq!(scan("/**  */"), ["/**  */"]);
        assert_eq!(scan("/**\n *\n */"), ["/**\n *\n */"]);
    }

    #[test]
    fn basic() {
        assert_eq!(
            scan(FILE),
            [
                "/**\n * The first group\n * \n * @since v1.0.0\n */",
                "/**\n * The second group\n * \n * @since v1.0.0\n */",
                "/** The third group */",
            ]
        );
    }

    #[test]
    fn indented() {
        assert_eq!(
            scan(INDENTED),
            [
                "/**\n * The first group\n * \n * @since v1.0.0\n */",
                "/**\n * The second group\n * \n * @since v1.0.0\n */",
                "/** The third group */",
            ]
        );
    }

    #[test]
    fn indented_keep_indent() {
        let out = scan_comments(INDENTED, ScanOptions { keep_indent: true });
        assert_eq!(
            out,
            [
                "        /**\n         * The first group\n         * \n         * @since v1.0.0\n         */",
                "        /**\n         * The second group\n         * \n         * @since v1.0.0\n         */",
                "        /** The third group */",
            ]
        );
    }

    #[test]
    fn plain_block_comments_are_ignored() {
        let file = "/*\n * not a doc comment\n */\nconst x = 1;\n/** Doc */";
        assert_eq!(scan(file), ["/** Doc */"]);
    }

    #[test]
    fn tab_indented_blocks() {
        let file = "\t/**\n\t * Tabbed\n\t */";
        assert_eq!(scan(file), ["/**\n * Tabbed\n */"]);
    }
}
