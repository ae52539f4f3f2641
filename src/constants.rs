//! Shared constants for the search tool.

/// Name used for the configuration directory.
pub const APP_NAME: &str = "textsearch";

/// Configuration file name inside the application config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "TEXTSEARCH_CONFIG_PATH";

/// File-name suffixes scanned by the command-line tool.
pub const SOURCE_EXTENSIONS: [&str; 2] = [".hpp", ".cpp"];

/// Default colour of the start banner.
pub const DEFAULT_HEADER_COLOR: &str = "yellow";
/// Default colour of directory announcements.
pub const DEFAULT_DIRECTORY_COLOR: &str = "cyan";
/// Default colour of the matched span (xterm-256 orange).
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#ffaf00";
