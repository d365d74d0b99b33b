//! Makefile generator.
//!
//! Converts a [`DependencyGraph`] into Makefile text: a `SOURCES=` list, a
//! fixed preamble that links the program from its objects, and one rule per
//! source listing every file the object depends on. The preamble expects the
//! including build to define `TARGET`, `TARGET_CC`, `TARGET_CFLAGS`,
//! `TARGET_LDFLAGS`, `LDFLAGS`, `CFLAGS` and `TARGET_OUTPUT`.

use crate::graph::DependencyGraph;
use crate::resolver::PrerequisiteList;
use camino::Utf8Path;
use itertools::Itertools;
use minijinja::{Environment, context};
use std::fmt::{self, Display, Formatter, Write};

mod error;

pub use error::EmitError;

const PREAMBLE_NAME: &str = "preamble.mk";

const PREAMBLE: &str = concat!(
    "OBJECT_PREFIX:={{ object_prefix }}\n",
    "{% if prefix_objects %}\n",
    "OBJECTS:=$(addprefix $(OBJECT_PREFIX),$(addsuffix .o,$(basename $(SOURCES))))\n",
    "{% else %}\n",
    "OBJECTS:=$(addsuffix .o,$(basename $(SOURCES)))\n",
    "{% endif %}\n",
    "OUTPUT_PREFIX:={{ output_prefix }}\n",
    "TARGET_OUTPUT:=$(addprefix $(OUTPUT_PREFIX),$(TARGET_OUTPUT))\n",
    "\n",
    "all: prepare_build $(TARGET_OUTPUT)\n",
    "\n",
    "prepare_build:\n",
    "\tmkdir -p $(OBJECT_PREFIX)\n",
    "\tmkdir -p $(OUTPUT_PREFIX)\n",
    ".PHONY: all prepare_build\n",
    "\n",
    "$(TARGET_OUTPUT): $(OBJECTS)\n",
    "\t$(TARGET_CC) $(TARGET_CFLAGS) $(TARGET_LDFLAGS) $(LDFLAGS) $(CFLAGS) $^ -o $@\n",
);

/// Recipe line emitted under every object rule.
pub const COMPILE_COMMAND: &str = "\t$(TARGET_CC) $(TARGET_CFLAGS) $(CFLAGS) -c -o $@ $<";

const SOURCE_SEPARATOR: &str = " \\\n        ";

/// Settings for the generated Makefile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakefileOptions {
    /// Value assigned to `OBJECT_PREFIX`.
    pub object_prefix: String,
    /// Value assigned to `OUTPUT_PREFIX`.
    pub output_prefix: String,
    /// Place objects under `$(OBJECT_PREFIX)`; otherwise rules name bare
    /// `<stem>.o` targets.
    pub prefix_objects: bool,
}

impl Default for MakefileOptions {
    fn default() -> Self {
        Self {
            object_prefix: "../obj/$(TARGET)/".to_owned(),
            output_prefix: "../bin/".to_owned(),
            prefix_objects: true,
        }
    }
}

/// Generate the Makefile text for `graph`.
///
/// # Errors
///
/// Returns [`EmitError`] if the preamble cannot be rendered.
///
/// # Examples
///
/// ```
/// use mkdeps::graph::DependencyGraph;
/// use mkdeps::makefile::{MakefileOptions, generate};
///
/// let mut graph = DependencyGraph::default();
/// graph.insert("main.c", ["main.c", "util.h"].map(String::from).into_iter().collect());
/// let options = MakefileOptions { prefix_objects: false, ..MakefileOptions::default() };
/// let text = generate(&graph, &options).unwrap();
/// assert!(text.contains("\nmain.o: main.c util.h\n"));
/// ```
pub fn generate(graph: &DependencyGraph, options: &MakefileOptions) -> Result<String, EmitError> {
    let mut out = String::new();
    writeln!(out, "SOURCES={}", graph.sources().join(SOURCE_SEPARATOR))?;
    writeln!(out)?;
    out.push_str(&render_preamble(options)?);
    for (source, prerequisites) in graph.iter() {
        write!(
            out,
            "{}",
            DisplayRule {
                source,
                prerequisites,
                prefix_objects: options.prefix_objects,
            }
        )?;
    }
    Ok(out)
}

fn render_preamble(options: &MakefileOptions) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template(PREAMBLE_NAME, PREAMBLE)?;
    env.get_template(PREAMBLE_NAME)?.render(context! {
        object_prefix => &options.object_prefix,
        output_prefix => &options.output_prefix,
        prefix_objects => options.prefix_objects,
    })
}

/// Object file name for `source`: its stem with a `.o` suffix.
#[must_use]
pub fn object_name(source: &str) -> String {
    let stem = Utf8Path::new(source).file_stem().unwrap_or(source);
    format!("{stem}.o")
}

/// Wrapper struct to display one object rule and its recipe.
struct DisplayRule<'a> {
    source: &'a str,
    prerequisites: &'a PrerequisiteList,
    prefix_objects: bool,
}

impl Display for DisplayRule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        let object = object_name(self.source);
        if self.prefix_objects {
            write!(f, "$(addprefix $(OBJECT_PREFIX),{object}):")?;
        } else {
            write!(f, "{object}:")?;
        }
        if !self.prerequisites.is_empty() {
            write!(f, " {}", self.prerequisites.iter().join(" "))?;
        }
        writeln!(f)?;
        writeln!(f, "{COMPILE_COMMAND}")
    }
}
