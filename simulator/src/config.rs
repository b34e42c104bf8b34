use anyhow::{Context, Result};
use econlab_types::games::contest::ContestConfig;
use econlab_types::games::public_goods::PublicGoodsConfig;
use econlab_types::games::rd::{RdConfig, RdVariant};
use econlab_types::games::ultimatum::UltimatumConfig;
use econlab_types::games::GameKind;
use econlab_types::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Simulation settings (from config file)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub seed: u64,
    /// Number of groups to fill with bots.
    pub groups: usize,
    pub game: GameSettings,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Game to run and its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameSettings {
    PublicGoods(PublicGoodsConfig),
    Ultimatum(UltimatumConfig),
    Rd(RdConfig),
    Contest(ContestConfig),
}

impl GameSettings {
    pub fn kind(&self) -> GameKind {
        match self {
            Self::PublicGoods(_) => GameKind::PublicGoods,
            Self::Ultimatum(_) => GameKind::Ultimatum,
            Self::Rd(config) => match config.variant {
                RdVariant::Spillover { .. } => GameKind::RdSpillover,
                RdVariant::WinnerTakesAll { .. } => GameKind::RdWinnerTakesAll,
            },
            Self::Contest(_) => GameKind::Contest,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::PublicGoods(config) => config.validate(),
            Self::Ultimatum(config) => config.validate(),
            Self::Rd(config) => config.validate(),
            Self::Contest(config) => config.validate(),
        }
    }
}

impl SimulationConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("could not parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.groups == 0 {
            return Err(ConfigError::Zero { field: "groups" }).context("invalid simulation");
        }
        self.game
            .validate()
            .with_context(|| format!("invalid {} config", self.game.kind().name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn loads_rd_config() {
        let file = write_config(
            "seed: 7\ngroups: 3\ngame:\n  kind: rd\n  variant: spillover\n  spill_over: true\n  num_rounds: 5\n  spillover_reward: 700\n",
        );
        let config = SimulationConfig::load(file.path()).expect("config should load");
        assert_eq!(config.seed, 7);
        assert_eq!(config.groups, 3);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.game.kind(), GameKind::RdSpillover);
        let GameSettings::Rd(rd) = config.game else {
            panic!("expected rd settings");
        };
        assert_eq!(rd.spillover_reward, 700);
        assert_eq!(rd.card_value, 50);
    }

    #[test]
    fn defaults_game_parameters() {
        let file = write_config("groups: 1\ngame:\n  kind: public_goods\n");
        let config = SimulationConfig::load(file.path()).expect("config should load");
        assert_eq!(
            config.game,
            GameSettings::PublicGoods(PublicGoodsConfig::default())
        );
    }

    #[test]
    fn rejects_invalid_game_config() {
        let file = write_config(
            "groups: 1\ngame:\n  kind: ultimatum\n  discount_factor: 1.5\n",
        );
        let err = SimulationConfig::load(file.path()).unwrap_err();
        assert!(
            err.to_string().contains("ultimatum"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_zero_groups() {
        let file = write_config("groups: 0\ngame:\n  kind: contest\n");
        assert!(SimulationConfig::load(file.path()).is_err());
    }

    #[test]
    fn shipped_configs_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs");
        for (name, kind) in [
            ("rd_spillover.yaml", GameKind::RdSpillover),
            ("contest.yaml", GameKind::Contest),
            ("ultimatum.yaml", GameKind::Ultimatum),
        ] {
            let config = SimulationConfig::load(&dir.join(name)).expect(name);
            assert_eq!(config.game.kind(), kind);
        }
    }

    #[test]
    fn reports_missing_file() {
        let err = SimulationConfig::load(Path::new("/nonexistent/econlab.yaml")).unwrap_err();
        assert!(err.to_string().contains("could not read"));
    }
}
