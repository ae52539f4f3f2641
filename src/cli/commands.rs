use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;

use crate::config::{AppConfig, ColorMode};
use crate::constants::SOURCE_EXTENSIONS;
use crate::fs_utils::ExtensionFilter;
use crate::search::{SearchRequest, SearchSink, SearchSummary, TextSearcher};

use super::formatters::{should_colorize, ConsoleSink, JsonSink, Palette};

/// Recursively search for a string in .hpp and .cpp files.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// The string to search for (matched literally, ignoring case).
    #[arg(required = true)]
    pub search_string: String,

    /// The directory to search in.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Match the search string as a whole word only.
    #[arg(short = 'w', long = "whole-word")]
    pub whole_word: bool,

    /// When to colour the output. Overrides the configuration file.
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Emit newline-delimited JSON events instead of text.
    #[arg(long)]
    pub json: bool,

    /// Path to a configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// The request this invocation describes. The extension filter is fixed.
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest::new(self.directory.clone(), self.search_string.clone())
            .with_extensions(ExtensionFilter::new(SOURCE_EXTENSIONS))
            .whole_word(self.whole_word)
    }

    /// Colour mode after applying the command-line override.
    pub fn color_mode(&self, config: &AppConfig) -> ColorMode {
        self.color.unwrap_or(config.color)
    }
}

/// Runs the search described by `args`, writing results to stdout.
pub fn handle_command(args: &CliArgs, config: &AppConfig) -> Result<SearchSummary> {
    let request = args.to_request();
    let searcher = TextSearcher::new(request).context("Invalid search request")?;

    let stdout = io::stdout();
    let out = stdout.lock();
    let summary = if args.json {
        let mut sink = JsonSink::new(out);
        run_with_sink(&searcher, &mut sink)?
    } else {
        let palette = Palette::from_config(&config.palette).context("Invalid colour palette")?;
        let color = should_colorize(args.color_mode(config));
        colored::control::set_override(color);
        let mut sink = ConsoleSink::new(out, palette, color);
        run_with_sink(&searcher, &mut sink)?
    };
    Ok(summary)
}

fn run_with_sink(searcher: &TextSearcher, sink: &mut dyn SearchSink) -> Result<SearchSummary> {
    let summary = searcher.run(sink).with_context(|| {
        format!(
            "Search in '{}' failed",
            searcher.request().root.display()
        )
    })?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["textsearch", "Camera"]).unwrap();
        assert_eq!(args.search_string, "Camera");
        assert_eq!(args.directory, PathBuf::from("."));
        assert!(!args.whole_word);
        assert!(!args.json);
        assert!(args.color.is_none());
    }

    #[test]
    fn test_whole_word_flags() {
        let short = CliArgs::try_parse_from(["textsearch", "-w", "cat", "src"]).unwrap();
        let long = CliArgs::try_parse_from(["textsearch", "cat", "src", "--whole-word"]).unwrap();
        assert!(short.whole_word);
        assert!(long.whole_word);
        assert_eq!(long.directory, PathBuf::from("src"));
    }

    #[test]
    fn test_missing_search_string_is_an_error() {
        assert!(CliArgs::try_parse_from(["textsearch"]).is_err());
    }

    #[test]
    fn test_request_uses_fixed_extensions() {
        let args = CliArgs::try_parse_from(["textsearch", "x"]).unwrap();
        let request = args.to_request();
        assert_eq!(request.extensions, ExtensionFilter::new([".hpp", ".cpp"]));
        assert!(!request.whole_word);
    }

    #[test]
    fn test_color_flag_overrides_config() {
        let config = AppConfig {
            color: ColorMode::Always,
            ..AppConfig::default()
        };
        let args = CliArgs::try_parse_from(["textsearch", "x", "--color", "never"]).unwrap();
        assert_eq!(args.color_mode(&config), ColorMode::Never);

        let args = CliArgs::try_parse_from(["textsearch", "x"]).unwrap();
        assert_eq!(args.color_mode(&config), ColorMode::Always);
    }
}
