//! Session configuration loaded from an optional TOML file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use minotaur_core::Rules;
use minotaur_session::SessionConfig;
use serde::Deserialize;

/// On-disk layout of the configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    seed: Option<u64>,
    rules: Rules,
}

/// Builds the session configuration from `path` (if any) and a seed given on
/// the command line, which wins over the file. Without either, a fresh seed
/// is drawn.
pub(crate) fn load(path: Option<&Path>, seed_override: Option<u64>) -> Result<SessionConfig> {
    let file = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file at {}", path.display()))?;
            parse(&contents).with_context(|| format!("invalid config file at {}", path.display()))?
        }
        None => ConfigFile::default(),
    };

    let seed = seed_override.or(file.seed).unwrap_or_else(rand::random::<u64>);
    file.rules.validate().context("config describes an unplayable session")?;

    Ok(SessionConfig {
        rules: file.rules,
        seed,
    })
}

fn parse(contents: &str) -> Result<ConfigFile> {
    toml::from_str(contents).context("failed to parse config toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_classic_rules() {
        let file = parse("").expect("empty config");
        assert_eq!(file.rules, Rules::default());
        assert_eq!(file.seed, None);
    }

    #[test]
    fn partial_rules_override_only_named_keys() {
        let file = parse(
            "seed = 11\n\
             [rules]\n\
             release_seconds = 20\n\
             lantern_failure_odds = 0\n",
        )
        .expect("config");

        assert_eq!(file.seed, Some(11));
        assert_eq!(file.rules.release_seconds, 20);
        assert_eq!(file.rules.lantern_failure_odds, 0);
        assert_eq!(file.rules.move_ticks, Rules::default().move_ticks);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("lives = 9\n").is_err());
    }

    #[test]
    fn command_line_seed_wins() {
        let config = load(None, Some(5)).expect("config");
        assert_eq!(config.seed, 5);
        assert_eq!(config.rules, Rules::default());
    }

    #[test]
    fn oversized_tiles_are_rejected_before_the_session_starts() {
        let path = std::env::temp_dir().join(format!("minotaur-huge-{}.toml", std::process::id()));
        fs::write(&path, "[rules]\ntile_length = 2000000000\n").expect("write config");

        let error = load(Some(&path), Some(1)).expect_err("oversized tiles");

        fs::remove_file(&path).expect("cleanup");
        assert!(format!("{error:#}").contains("tile_length 2000000000 exceeds the maximum"));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error =
            load(Some(Path::new("/nonexistent/minotaur.toml")), None).expect_err("missing file");
        assert!(format!("{error:#}").contains("/nonexistent/minotaur.toml"));
    }
}
