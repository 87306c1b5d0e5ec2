//! Constants for dope
//!
//! Tag markers, file names, and other literal values shared across modules.

// === Vaults and Notes ===

/// Directory inside a vault whose notes are ignored by scans
pub const TRASH_DIR: &str = ".trash";

/// Extension of note files (without the dot)
pub const NOTE_EXTENSION: &str = "md";

/// Suffix tried when a link target omits the note extension
pub const MARKDOWN_SUFFIX: &str = ".md";

/// Lines starting with this marker open or close a fenced code block
pub const CODE_FENCE: &str = "```";

/// Characters that must not appear in note or attachment file names
pub const RESERVED_SYMBOLS: [char; 5] = ['`', '[', ']', '\'', '"'];

// === Configuration ===

/// Application directory name under the platform config directory
pub const APP_DIR: &str = "dope";

/// File holding the JSON list of vault directories
pub const VAULTS_FILENAME: &str = "vaults.json";

/// Environment variable overriding the configuration directory
pub const ENV_CONFIG_DIR: &str = "DOPE_CONFIG_DIR";

/// Environment variable overriding today's date (YYYY-MM-DD)
pub const ENV_TODAY: &str = "DOPE_TODAY";

// === Tags ===

/// Prefix of lesson tags
pub const EDU_TAG_PREFIX: &str = "#edu/";

/// Number of `/` separated components of a lesson tag, `#edu` included
pub const EDU_TAG_COMPONENTS: usize = 4;

/// Lesson actions: x (next), n (now), w (wait)
pub const EDU_ACTIONS: [&str; 3] = ["x", "n", "w"];

/// Number of `/` separated components of a task tag, marker included
pub const TASK_TAG_COMPONENTS: usize = 3;

/// Priority used when a task tag has none or a corrupted one
pub const DEFAULT_PRIORITY: u8 = 3;

/// Decorative glyph stripped from descriptions
pub const DECORATION_GLYPH: &str = "\u{1F7E7}";

/// Date format of task deadlines
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Compact date format also accepted for task deadlines
pub const DEADLINE_COMPACT_FORMAT: &str = "%Y%m%d";

// === Links ===

/// URI prefixes of links pointing outside the vaults
pub const EXTERNAL_PREFIXES: [&str; 4] = ["http", "mailto", "ssh", "chrome"];

/// Replacement target written by `links mark-broken`
pub const BROKEN_PREFIX: &str = "broken:";

/// Legacy Evernote link prefix
pub const EVERNOTE_PREFIX: &str = "evernote:";

/// Legacy local file link prefix
pub const FILE_PREFIX: &str = "file:";

/// Percent-encoded sequences decoded in link targets
pub const PERCENT_DECODE_TABLE: [(&str, &str); 4] =
    [("%20", " "), ("%28", "("), ("%29", ")"), ("%40", "@")];
