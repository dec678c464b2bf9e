use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "snipfmt", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a configuration file (default: nearest .snipfmt.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print diagnostics and formatted output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Diagnostic output format
    #[arg(long, global = true, value_parser = ["text", "json"],
          help = "Output format (default: text, or output-format in config)")]
    pub output_format: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format the code fragments of documents in place
    Fmt(FmtArgs),
    /// Format a single snippet and print the result
    Snippet(SnippetArgs),
    /// List the rules of both phases
    Rules,
    /// Create a default .snipfmt.toml in the current directory
    Init,
}

#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Files or directories to format (use '-' for stdin)
    #[arg(required = false)]
    pub paths: Vec<String>,

    /// Exit with code 1 if any document would change, without writing
    #[arg(long, help = "Exit with code 1 if any formatting changes would be made (for CI)")]
    pub check: bool,

    /// Which transforms run
    #[arg(long, value_parser = ["code-only", "all"])]
    pub mode: Option<String>,

    /// Give up on a document after this many passes
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Exclude files or directories (comma-separated glob patterns, added to the config)
    #[arg(long)]
    pub exclude: Option<String>,
}

impl FmtArgs {
    pub fn reads_stdin(&self) -> bool {
        self.paths.len() == 1 && self.paths[0] == "-"
    }
}

#[derive(Args, Debug)]
pub struct SnippetArgs {
    /// File holding the snippet (omit or use '-' for stdin)
    pub file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_arguments() {
        let cli = Cli::try_parse_from(["snipfmt", "fmt", "docs", "--check", "--mode", "all", "--max-iterations", "3"])
            .unwrap();
        let Commands::Fmt(args) = cli.command else {
            panic!("expected fmt");
        };
        assert_eq!(args.paths, vec!["docs"]);
        assert!(args.check);
        assert_eq!(args.mode.as_deref(), Some("all"));
        assert_eq!(args.max_iterations, Some(3));
        assert!(!args.reads_stdin());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["snipfmt", "snippet", "-", "--output-format", "json", "--no-color"]).unwrap();
        assert_eq!(cli.output_format.as_deref(), Some("json"));
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::Snippet(SnippetArgs { file: Some(ref f) }) if f == "-"));
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert!(Cli::try_parse_from(["snipfmt", "fmt", "--mode", "everything"]).is_err());
    }
}
