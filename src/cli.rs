//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and its subcommands. It only
//! depends on `clap` and the standard library because the build script
//! includes it directly to render the manual page.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Generate Makefile dependency rules from the include graph of C and C++
/// sources.
#[derive(Debug, Parser)]
#[command(name = "mkdeps", author, version, about, long_about = None)]
pub struct Cli {
    /// Source directory to scan; include targets are resolved inside it.
    ///
    /// Output and scaffold paths are relative to this directory too.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Enable verbose diagnostic logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// File extension treated as a compilable source (repeatable).
    ///
    /// Defaults to c, cc, cpp and cxx.
    #[arg(long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// What to do when a source references a file that cannot be read.
    #[arg(long, value_enum, value_name = "POLICY", default_value_t = OnMissing::Abort)]
    pub on_missing: OnMissing,

    /// Fail on `#include <...>` targets missing from the source directory
    /// instead of treating them as system headers.
    #[arg(long)]
    pub strict_system_includes: bool,

    /// Log a warning for every include cycle found.
    #[arg(long)]
    pub warn_cycles: bool,

    /// Optional subcommand to execute; defaults to `makefile` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse command-line arguments, providing `makefile` as the default
    /// command.
    #[must_use]
    pub fn parse_with_default() -> Self {
        Self::parse().with_default_command()
    }

    /// Parse the provided arguments, applying the default command when needed.
    ///
    /// # Errors
    ///
    /// Returns a [`clap::Error`] if the arguments are invalid.
    pub fn try_parse_from_with_default<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map(Self::with_default_command)
    }

    /// Apply the default command if none was specified.
    #[must_use]
    pub fn with_default_command(mut self) -> Self {
        if self.command.is_none() {
            self.command = Some(Commands::Makefile(MakefileArgs::default()));
        }
        self
    }
}

/// Policy for sources whose includes cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnMissing {
    /// Stop and exit with an error.
    Abort,
    /// Warn, leave the source out and continue.
    Skip,
}

/// Output format of the `graph` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// JSON object mapping each source to its prerequisites.
    Json,
    /// Graphviz DOT digraph.
    Dot,
}

/// Arguments accepted by the `makefile` command.
#[derive(Debug, Args, PartialEq, Eq, Clone)]
pub struct MakefileArgs {
    /// Output path for the generated Makefile; `-` writes to stdout.
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: PathBuf,

    /// Value assigned to `OBJECT_PREFIX`.
    #[arg(long, value_name = "PREFIX", default_value = "../obj/$(TARGET)/")]
    pub object_prefix: String,

    /// Value assigned to `OUTPUT_PREFIX`.
    #[arg(long, value_name = "PREFIX", default_value = "../bin/")]
    pub output_prefix: String,

    /// Name objects `<stem>.o` instead of placing them under
    /// `$(OBJECT_PREFIX)`.
    #[arg(long)]
    pub no_object_prefix: bool,
}

impl Default for MakefileArgs {
    fn default() -> Self {
        Self {
            file: PathBuf::from("-"),
            object_prefix: "../obj/$(TARGET)/".to_owned(),
            output_prefix: "../bin/".to_owned(),
            no_object_prefix: false,
        }
    }
}

/// Arguments accepted by the `scaffold` command.
#[derive(Debug, Args, PartialEq, Eq, Clone)]
pub struct ScaffoldArgs {
    /// Project tag used in include guard names.
    #[arg(long, value_name = "TAG")]
    pub guard_prefix: Option<String>,

    /// Header included with angle brackets from every new header.
    #[arg(long, value_name = "HEADER")]
    pub config_header: Option<String>,

    /// Emit inline boilerplate defining MACRO as `inline` outside the
    /// module's own source file.
    #[arg(long, value_name = "MACRO")]
    pub inline_macro: Option<String>,

    /// Header included at the end of every new header to undefine the
    /// inline macro.
    #[arg(long, value_name = "HEADER", requires = "inline_macro")]
    pub inline_end: Option<String>,

    /// Module paths without extension, such as `list` or `sys/thread`.
    #[arg(value_name = "MODULE", required = true)]
    pub modules: Vec<String>,
}

/// Available top-level commands for mkdeps.
#[derive(Debug, Subcommand, PartialEq, Eq, Clone)]
pub enum Commands {
    /// Write the Makefile for the sources in the directory (default).
    Makefile(MakefileArgs),

    /// Print the resolved dependency graph.
    Graph {
        /// Output format.
        #[arg(long, value_enum, default_value_t = GraphFormat::Json)]
        format: GraphFormat,
    },

    /// Create `.c`/`.h` boilerplate for new modules.
    Scaffold(ScaffoldArgs),
}
