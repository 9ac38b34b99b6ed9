pub mod build;
pub mod parse;

use clap::{Args, Subcommand, ValueEnum};
use paramtree::{MergeMode, ParamConfig};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// The whole input is a params string
    Params,
    /// The query string of a URL
    Query,
    /// The fragment of a URL
    Fragment,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// Rewrite the query string
    Query,
    /// Rewrite the fragment
    Fragment,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// New params override the URL's params
    Merge,
    /// The URL's params override new params
    Keep,
    /// Drop the URL's params
    Replace,
}

impl From<Mode> for MergeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Merge => MergeMode::Merge,
            Mode::Keep => MergeMode::KeepExisting,
            Mode::Replace => MergeMode::Replace,
        }
    }
}

/// Fragment options shared by both commands
#[derive(Args, Debug, Clone)]
pub struct FragmentArgs {
    /// Load fragment options from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use `#!` fragments
    #[arg(long)]
    ajax_crawlable: bool,

    /// Characters to leave unescaped in fragments
    #[arg(long)]
    no_escape: Option<String>,
}

impl FragmentArgs {
    /// Flags override values from the config file, which override defaults.
    pub fn to_config(&self) -> paramtree::Result<ParamConfig> {
        let mut config = match &self.config {
            Some(path) => ParamConfig::from_file(path)?,
            None => ParamConfig::default(),
        };
        if self.ajax_crawlable {
            config.ajax_crawlable = true;
        }
        if let Some(chars) = &self.no_escape {
            config.no_escape = chars.clone();
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a params string or URL into JSON
    ///
    /// Usage examples:
    /// # Parse a bare params string
    /// paramtree parse 'a[b]=1&a[c][]=2'
    ///
    /// # Parse the fragment of a URL, converting numbers and booleans
    /// paramtree parse 'http://example.com/#page=2&open=true' --source fragment --coerce
    Parse {
        /// Params string or URL
        input: String,

        /// Convert numbers, booleans, null and undefined
        #[arg(long)]
        coerce: bool,

        /// Which part of the input to parse
        #[arg(long, value_enum, default_value = "query")]
        source: Source,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        fragment: FragmentArgs,
    },

    /// Write params into the query string or fragment of a URL
    ///
    /// Usage examples:
    /// # Set page=2, keeping other query params
    /// paramtree build '/search?q=rust&page=1' 'page=2'
    ///
    /// # Replace the fragment entirely
    /// paramtree build '/app#old=1' 'view=list' --target fragment --mode replace
    Build {
        /// URL to rewrite
        url: String,

        /// Params string to write
        params: String,

        /// Which part of the URL to rewrite
        #[arg(long, value_enum, default_value = "query")]
        target: Target,

        /// How new params combine with existing ones
        #[arg(long, value_enum, default_value = "merge")]
        mode: Mode,

        #[command(flatten)]
        fragment: FragmentArgs,
    },
}

pub fn execute_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Parse {
            input,
            coerce,
            source,
            pretty,
            fragment,
        } => {
            let config = fragment.to_config()?;
            let output = parse::handle_parse_command(&input, source, coerce, pretty, &config)?;
            println!("{output}");
            Ok(())
        }

        Commands::Build {
            url,
            params,
            target,
            mode,
            fragment,
        } => {
            let config = fragment.to_config()?;
            let output = build::handle_build_command(&url, &params, target, mode.into(), &config)?;
            println!("{output}");
            Ok(())
        }
    }
}
