//! Configuration file loader with multi-source merging

use super::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;
use tracing::{debug, warn};

const PROJECT_FILES: [&str; 2] = ["scribe.toml", ".scribe.toml"];
const ENV_PREFIX: &str = "SCRIBE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `SCRIBE_`-prefixed environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./scribe.toml` or `./.scribe.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/scribe/config.toml`
    /// 5. Default values
    ///
    /// Warnings found by [`FileConfig::validate`] are logged; errors abort.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let config: FileConfig = Self::figment(config_path)
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))?;

        let (errors, warnings): (Vec<_>, Vec<_>) =
            config.validate().into_iter().partition(|i| i.is_error());
        for issue in &warnings {
            warn!("config: {}", issue);
        }
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors));
        }
        Ok(config)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            debug!("Loading project config {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            debug!("Loading config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("scribe").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./scribe.toml or ./.scribe.toml"),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.providers.default.is_none());
        assert_eq!(config.providers.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.backend.kind, "supabase");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().ends_with("scribe/config.toml"));
    }

    #[test]
    fn test_project_file_and_env_merge() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "scribe.toml",
                r#"
[providers]
default = "mock"

[backend]
kind = "memory"
"#,
            )?;
            jail.set_env("SCRIBE_PROVIDERS__GEMINI__MODEL", "gemini-env");

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.providers.default.as_deref(), Some("mock"));
            assert_eq!(config.backend.kind, "memory");
            assert_eq!(config.providers.gemini.model, "gemini-env");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_overrides_project() {
        Jail::expect_with(|jail| {
            jail.create_file(".scribe.toml", "[backend]\nkind = \"memory\"\n")?;
            jail.create_file(
                "custom.toml",
                "[backend]\nkind = \"supabase\"\n\n[backend.supabase]\nurl = \"https://x.supabase.co\"\n",
            )?;

            let path = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&path)).map_err(|e| e.to_string())?;
            assert_eq!(config.backend.kind, "supabase");
            assert_eq!(config.backend.supabase.url, "https://x.supabase.co");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("scribe.toml", "[providers.gemini]\nmodel = \"\"\n")?;

            match ConfigLoader::load(None) {
                Err(ConfigError::Invalid(issues)) => {
                    assert_eq!(issues[0].field, "providers.gemini.model");
                }
                other => panic!("expected invalid config, got {:?}", other.map(|_| ())),
            }
            Ok(())
        });
    }

    #[test]
    fn test_malformed_toml_is_load_error() {
        Jail::expect_with(|jail| {
            jail.create_file("scribe.toml", "[providers\n")?;
            assert!(matches!(ConfigLoader::load(None), Err(ConfigError::Load(_))));
            Ok(())
        });
    }
}
