/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub game: GameSettings,
    pub display: DisplayConfig,
    pub log: LogConfig,
    /// `None` = built-in word list.
    pub words_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub level_every: u32,
    pub min_length: usize,
    pub max_length: usize,
    pub length_choices: usize,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    pub tick_rate_ms: u64,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub file: PathBuf,
    pub level: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    words_file: String,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_level_every")]
    level_every: u32,
    #[serde(default = "default_min_length")]
    min_length: usize,
    #[serde(default = "default_max_length")]
    max_length: usize,
    #[serde(default = "default_length_choices")]
    length_choices: usize,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_file")]
    file: String,
    #[serde(default = "default_log_level")]
    level: String,
}

// ── Defaults ──

fn default_level_every() -> u32 { 3 }
fn default_min_length() -> usize { 3 }
fn default_max_length() -> usize { 12 }
fn default_length_choices() -> usize { 4 }
fn default_tick_rate() -> u64 { 50 }
fn default_log_file() -> String { "orthoplay.log".into() }
fn default_log_level() -> String { "info".into() }

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            level_every: default_level_every(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            length_choices: default_length_choices(),
        }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay { tick_rate_ms: default_tick_rate() }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog { file: default_log_file(), level: default_log_level() }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        TomlGame::default().into()
    }
}

impl From<TomlGame> for GameSettings {
    fn from(t: TomlGame) -> Self {
        // Keep the range usable even if the file has it backwards.
        let min_length = t.min_length.max(1);
        GameSettings {
            level_every: t.level_every.max(1),
            min_length,
            max_length: t.max_length.max(min_length),
            length_choices: t.length_choices.max(1),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys fall back to defaults.
    ///
    /// Runs before logging is set up, so problems go to stderr.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        Self::resolve(toml_cfg, &search_dirs)
    }

    fn resolve(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        let words_file = match toml_cfg.general.words_file.trim() {
            "" => None,
            name => Some(resolve_path(name, search_dirs)),
        };

        GameConfig {
            game: toml_cfg.game.into(),
            display: DisplayConfig {
                tick_rate_ms: toml_cfg.display.tick_rate_ms.max(1),
            },
            log: LogConfig {
                file: PathBuf::from(toml_cfg.log.file),
                level: toml_cfg.log.level,
            },
            words_file,
        }
    }
}

/// Absolute paths as-is; relative ones are looked up in the candidate dirs,
/// falling back to CWD-relative.
fn resolve_path(name: &str, search_dirs: &[PathBuf]) -> PathBuf {
    let path = PathBuf::from(name);
    if path.is_absolute() {
        return path;
    }
    search_dirs.iter()
        .map(|d| d.join(name))
        .find(|p| p.is_file())
        .unwrap_or(path)
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => return parse_toml(&text),
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

fn parse_toml(text: &str) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Warning: config.toml parse error: {e}");
            eprintln!("Using default settings.");
            TomlConfig::default()
        }
    }
}
