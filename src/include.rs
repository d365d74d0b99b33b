//! Include directive extraction.
//!
//! Scans the text of a C or C++ file for `#include "path"` and
//! `#include <path>` lines. The scan is purely lexical: preprocessor
//! conditionals, macros, line continuations and comments are not interpreted,
//! so a directive inside a block comment is still reported.
//!
//! # Examples
//!
//! ```
//! use mkdeps::include::{IncludeForm, extract};
//!
//! let found = extract("#include \"list.h\"\n  # include <stdio.h>\nint x;\n");
//! let targets: Vec<_> = found.iter().map(|d| d.target.as_str()).collect();
//! assert_eq!(targets, ["list.h", "stdio.h"]);
//! assert_eq!(found[1].form, IncludeForm::Angle);
//! ```

/// Delimiter style of an include directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeForm {
    /// `#include "path"`.
    Quoted,
    /// `#include <path>`.
    Angle,
}

impl IncludeForm {
    const fn from_opening(delimiter: char) -> Option<Self> {
        match delimiter {
            '"' => Some(Self::Quoted),
            '<' => Some(Self::Angle),
            _ => None,
        }
    }

    const fn closing(self) -> char {
        match self {
            Self::Quoted => '"',
            Self::Angle => '>',
        }
    }
}

/// A single `#include` line found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Target text exactly as written between the delimiters.
    pub target: String,
    /// Delimiter style used by the directive.
    pub form: IncludeForm,
    /// One-based line number of the directive.
    pub line: usize,
}

/// Extract every include directive from `text`, in file order.
#[must_use]
pub fn extract(text: &str) -> Vec<IncludeDirective> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            parse_directive(line).map(|(form, target)| IncludeDirective {
                target: target.to_owned(),
                form,
                line: idx + 1,
            })
        })
        .collect()
}

/// Parse one line, returning the delimiter style and raw target.
fn parse_directive(line: &str) -> Option<(IncludeForm, &str)> {
    let directive = line.trim_start().strip_prefix('#')?.trim_start();
    let operand = directive.strip_prefix("include")?.trim_start();
    let mut chars = operand.chars();
    let form = chars.next().and_then(IncludeForm::from_opening)?;
    let body = chars.as_str();
    let end = body.find(form.closing())?;
    body.get(..end)
        .filter(|target| !target.is_empty())
        .map(|target| (form, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#include \"foo.h\"", Some((IncludeForm::Quoted, "foo.h")))]
    #[case("#include <stdio.h>", Some((IncludeForm::Angle, "stdio.h")))]
    #[case("   #   include   \"sub/dir.h\"  // trailing", Some((IncludeForm::Quoted, "sub/dir.h")))]
    #[case("\t#include\"tight.h\"", Some((IncludeForm::Quoted, "tight.h")))]
    #[case("#include <sys/types.h> /* c */", Some((IncludeForm::Angle, "sys/types.h")))]
    #[case("#include \"./foo.h\"", Some((IncludeForm::Quoted, "./foo.h")))]
    #[case("#include_next <stdio.h>", None)]
    #[case("#include FOO_HEADER", None)]
    #[case("#include \"unterminated.h", None)]
    #[case("#include \"\"", None)]
    #[case("#define include \"x.h\"", None)]
    #[case("// #include \"commented.h\"", None)]
    #[case("int include = 0;", None)]
    fn parses_single_lines(#[case] line: &str, #[case] expected: Option<(IncludeForm, &str)>) {
        assert_eq!(parse_directive(line), expected);
    }

    #[rstest]
    fn reports_targets_in_file_order_with_line_numbers() {
        let text = concat!(
            "#include \"b.h\"\n",
            "\n",
            "#ifdef WINDOWS\n",
            "#include <windows.h>\n",
            "#endif\n",
            "#include \"a.h\"\n",
        );
        let found = extract(text);
        let summary: Vec<_> = found
            .iter()
            .map(|d| (d.target.as_str(), d.form, d.line))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("b.h", IncludeForm::Quoted, 1),
                ("windows.h", IncludeForm::Angle, 4),
                ("a.h", IncludeForm::Quoted, 6),
            ]
        );
    }

    #[rstest]
    fn directives_inside_block_comments_are_still_reported() {
        let text = "/*\n#include \"hidden.h\"\n*/\n";
        let found = extract(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|d| d.target.as_str()), Some("hidden.h"));
    }

    #[rstest]
    fn repeated_directives_are_kept() {
        let found = extract("#include \"x.h\"\r\n#include \"x.h\"\r\n");
        assert_eq!(found.len(), 2);
    }

    #[rstest]
    fn empty_text_yields_nothing() {
        assert!(extract("").is_empty());
    }
}
