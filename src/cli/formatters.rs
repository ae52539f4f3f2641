// Formatters for search output: coloured console text and newline-delimited JSON.
use colored::{Color, Colorize};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::config::{ColorMode, PaletteConfig};
use crate::error::{Result, SearchError};
use crate::search::{LineMatch, SearchRequest, SearchSink, SearchSummary};

/// Colours used by [`ConsoleSink`], resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub header: Color,
    pub directory: Color,
    pub highlight: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            header: Color::Yellow,
            directory: Color::Cyan,
            highlight: Color::TrueColor { r: 0xff, g: 0xaf, b: 0x00 },
        }
    }
}

impl Palette {
    pub fn from_config(config: &PaletteConfig) -> Result<Self> {
        Ok(Self {
            header: parse_color(&config.header)?,
            directory: parse_color(&config.directory)?,
            highlight: parse_color(&config.highlight)?,
        })
    }
}

/// Accepts `colored` colour names ("cyan", "bright red") and `#rrggbb`.
pub fn parse_color(value: &str) -> Result<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
        };
        return match (hex.len(), channel(0..2), channel(2..4), channel(4..6)) {
            (6, Some(r), Some(g), Some(b)) => Ok(Color::TrueColor { r, g, b }),
            _ => Err(SearchError::Config(format!("Invalid hex colour: {}", value))),
        };
    }
    value
        .parse::<Color>()
        .map_err(|_| SearchError::Config(format!("Unknown colour name: {}", value)))
}

/// Decides whether colour sequences should be written to stdout.
pub fn should_colorize(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            let no_color = std::env::var_os("NO_COLOR").map_or(false, |v| !v.is_empty());
            !no_color && io::stdout().is_terminal()
        }
    }
}

/// Human-readable output: a banner, one line per directory, one line per
/// matching line and one per unreadable file.
pub struct ConsoleSink<W: Write> {
    out: W,
    palette: Palette,
    color: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, palette: Palette, color: bool) -> Self {
        Self { out, palette, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// The line with its matched span highlighted, surrounding whitespace trimmed.
    fn render_line(&self, found: &LineMatch<'_>) -> String {
        if !self.color {
            return found.line.trim().to_string();
        }
        let highlighted = format!(
            "{}{}{}",
            found.before(),
            self.paint(found.matched_text(), self.palette.highlight),
            found.after()
        );
        highlighted.trim().to_string()
    }
}

impl<W: Write> SearchSink for ConsoleSink<W> {
    fn on_start(&mut self, request: &SearchRequest) -> io::Result<()> {
        let banner = format!(
            "Searching in: {}, for {}",
            request.root.display(),
            request.text
        );
        let banner = self.paint(&banner, self.palette.header);
        writeln!(self.out, "{}", banner)
    }

    fn on_directory(&mut self, path: &Path) -> io::Result<()> {
        let line = self.paint(&path.display().to_string(), self.palette.directory);
        writeln!(self.out, "{}", line)
    }

    fn on_match(&mut self, found: &LineMatch<'_>) -> io::Result<()> {
        let rendered = self.render_line(found);
        writeln!(
            self.out,
            "Found in {} (Line {}): {}",
            found.path.display(),
            found.line_number,
            rendered
        )
    }

    fn on_file_error(&mut self, path: &Path, error: &SearchError) -> io::Result<()> {
        writeln!(self.out, "Could not read {}: {}", path.display(), error)
    }

    fn on_finish(&mut self, _summary: &SearchSummary) -> io::Result<()> {
        self.out.flush()
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonEvent<'a> {
    Directory {
        path: String,
    },
    Match {
        path: String,
        line_number: usize,
        line: &'a str,
        start: usize,
        end: usize,
    },
    Error {
        path: String,
        message: String,
    },
    Summary(&'a SearchSummary),
}

/// Newline-delimited JSON output, one object per event.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &JsonEvent<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> SearchSink for JsonSink<W> {
    fn on_directory(&mut self, path: &Path) -> io::Result<()> {
        self.emit(&JsonEvent::Directory {
            path: path.display().to_string(),
        })
    }

    fn on_match(&mut self, found: &LineMatch<'_>) -> io::Result<()> {
        self.emit(&JsonEvent::Match {
            path: found.path.display().to_string(),
            line_number: found.line_number,
            line: found.line,
            start: found.span.start,
            end: found.span.end,
        })
    }

    fn on_file_error(&mut self, path: &Path, error: &SearchError) -> io::Result<()> {
        self.emit(&JsonEvent::Error {
            path: path.display().to_string(),
            message: error.to_string(),
        })
    }

    fn on_finish(&mut self, summary: &SearchSummary) -> io::Result<()> {
        self.emit(&JsonEvent::Summary(summary))?;
        self.out.flush()
    }
}
