//! Module boilerplate generation.
//!
//! Writes a `<module>.c` and `<module>.h` pair with include guards and
//! `extern "C"` wrappers. Existing files are never overwritten: creation uses
//! create-new semantics and a pre-existing file is reported as skipped.
//! Headers can optionally carry an inline-macro block keyed on the source
//! file's guard define, plus a trailing include that undefines the macro.

use camino::Utf8Path;
use cap_std::fs::OpenOptions;
use cap_std::fs_utf8::Dir;
use minijinja::{Environment, Value, context};
use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};
use tracing::info;

mod error;

pub use error::ScaffoldError;

const SOURCE_TEMPLATE: &str = concat!(
    "#define {{ source_guard }}\n",
    "\n",
    "#include \"{{ header_path }}\"\n",
    "\n",
    "#ifdef __cplusplus\n",
    "extern \"C\" {\n",
    "#endif /* __cplusplus */\n",
    "\n",
    "\n",
    "\n",
    "#ifdef __cplusplus\n",
    "}\n",
    "#endif /* __cplusplus */\n",
);

const HEADER_TEMPLATE: &str = concat!(
    "#ifndef {{ header_guard }}\n",
    "#define {{ header_guard }} 1\n",
    "{% if config_header %}\n",
    "\n",
    "/* Includes */\n",
    "#include <{{ config_header }}>\n",
    "{% endif %}\n",
    "{% if inline_macro %}\n",
    "\n",
    "/* Inline boilerplate */\n",
    "#ifdef {{ source_guard }}\n",
    "#define {{ inline_macro }}\n",
    "#else\n",
    "#define {{ inline_macro }} inline\n",
    "#endif /* {{ source_guard }} */\n",
    "/* End inline boilerplate */\n",
    "{% endif %}\n",
    "\n",
    "#ifdef __cplusplus\n",
    "extern \"C\" {\n",
    "#endif /* __cplusplus */\n",
    "\n",
    "\n",
    "\n",
    "#ifdef __cplusplus\n",
    "}\n",
    "#endif /* __cplusplus */\n",
    "{% if inline_macro and inline_end %}\n",
    "\n",
    "/* Undefine {{ inline_macro }} */\n",
    "#include <{{ inline_end }}>\n",
    "{% endif %}\n",
    "\n",
    "#endif /* end {{ header_guard }} include guard */\n",
);

/// Options for generated boilerplate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Project tag inserted into guard names, e.g. `SNOW` gives
    /// `__SNOW__LIST_H__`.
    pub guard_prefix: Option<String>,
    /// Header included with angle brackets at the top of every new header.
    pub config_header: Option<String>,
    /// Macro defined empty inside the module's own `.c` file and as `inline`
    /// everywhere else, keyed on the source guard.
    pub inline_macro: Option<String>,
    /// Header included at the end of every new header to undefine
    /// `inline_macro`. Ignored without `inline_macro`.
    pub inline_end: Option<String>,
}

/// Result of scaffolding one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was created.
    Written(String),
    /// The file already existed and was left untouched.
    Skipped(String),
}

impl Display for FileOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written(path) => write!(f, "Writing '{path}'"),
            Self::Skipped(path) => write!(f, "'{path}' already exists - skipping"),
        }
    }
}

/// Derive a guard stem from a module base name.
///
/// Letters are upper-cased and each run of other characters becomes a
/// single underscore.
///
/// ```
/// assert_eq!(mkdeps::scaffold::guard_name("thread-storage.v2"), "THREAD_STORAGE_V2");
/// ```
#[must_use]
pub fn guard_name(base: &str) -> String {
    let mut guard = String::with_capacity(base.len());
    let mut in_gap = false;
    for ch in base.chars() {
        if ch.is_ascii_alphanumeric() {
            guard.push(ch.to_ascii_uppercase());
            in_gap = false;
        } else if !in_gap {
            guard.push('_');
            in_gap = true;
        }
    }
    guard
}

/// Renders and writes module boilerplate.
#[derive(Debug)]
pub struct Scaffolder {
    env: Environment<'static>,
    options: ScaffoldOptions,
}

impl Scaffolder {
    /// Prepare the templates.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Template`] if a built-in template fails to
    /// parse.
    pub fn new(options: ScaffoldOptions) -> Result<Self, ScaffoldError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_keep_trailing_newline(true);
        for (name, source) in [("module.c", SOURCE_TEMPLATE), ("module.h", HEADER_TEMPLATE)] {
            env.add_template(name, source)
                .map_err(|err| template_error(name, err))?;
        }
        Ok(Self { env, options })
    }

    /// Render the `.c` and `.h` contents for `module`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError`] if the module name is invalid or rendering
    /// fails.
    pub fn render(&self, module: &str) -> Result<(String, String), ScaffoldError> {
        let base = Utf8Path::new(module)
            .file_name()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ScaffoldError::InvalidModule {
                module: module.to_owned(),
            })?;
        let guard = self.qualified_guard(&guard_name(base));
        let ctx = context! {
            source_guard => format!("{guard}_C__"),
            header_guard => format!("{guard}_H__"),
            header_path => format!("{module}.h"),
            config_header => optional(self.options.config_header.as_deref()),
            inline_macro => optional(self.options.inline_macro.as_deref()),
            inline_end => optional(self.options.inline_end.as_deref()),
        };
        let source = self.render_one("module.c", module, &ctx)?;
        let header = self.render_one("module.h", module, &ctx)?;
        Ok((source, header))
    }

    /// Write the `.c` and `.h` pair for `module` into `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError`] if rendering fails or a new file cannot be
    /// written.
    pub fn write_module(&self, root: &Dir, module: &str) -> Result<[FileOutcome; 2], ScaffoldError> {
        let (source, header) = self.render(module)?;
        if let Some(parent) = Utf8Path::new(module).parent().filter(|p| !p.as_str().is_empty()) {
            root.create_dir_all(parent)
                .map_err(|err| ScaffoldError::Write {
                    path: parent.to_string(),
                    source: err,
                })?;
        }
        let source_outcome = write_new(root, &format!("{module}.c"), &source)?;
        let header_outcome = write_new(root, &format!("{module}.h"), &header)?;
        Ok([source_outcome, header_outcome])
    }

    fn qualified_guard(&self, guard: &str) -> String {
        match self.options.guard_prefix.as_deref().map(guard_name) {
            Some(prefix) if !prefix.is_empty() => format!("__{prefix}__{guard}"),
            _ => format!("__{guard}"),
        }
    }

    fn render_one(&self, template: &str, module: &str, ctx: &Value) -> Result<String, ScaffoldError> {
        let path = format!("{module}.{}", template.trim_start_matches("module."));
        self.env
            .get_template(template)
            .and_then(|tmpl| tmpl.render(ctx))
            .map_err(|err| template_error(&path, err))
    }
}

fn optional(value: Option<&str>) -> Value {
    value.map_or(Value::UNDEFINED, Value::from)
}

fn template_error(path: &str, source: minijinja::Error) -> ScaffoldError {
    ScaffoldError::Template {
        path: path.to_owned(),
        source,
    }
}

/// Create `path` with `contents` unless it already exists.
fn write_new(root: &Dir, path: &str, contents: &str) -> Result<FileOutcome, ScaffoldError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let write_error = |source: io::Error| ScaffoldError::Write {
        path: path.to_owned(),
        source,
    };
    match root.open_with(path, &options) {
        Ok(mut file) => {
            file.write_all(contents.as_bytes()).map_err(write_error)?;
            info!(path, "wrote boilerplate");
            Ok(FileOutcome::Written(path.to_owned()))
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            Ok(FileOutcome::Skipped(path.to_owned()))
        }
        Err(err) => Err(write_error(err)),
    }
}
