use camino::Utf8Path;
use camino::Utf8PathBuf;
use config::Config;
use config::ConfigError as ExternalConfigError;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PATH: &str = "resources/js/Pages/SearchResults.vue";
pub const DEFAULT_START_MARKER: &str = "<template>";
pub const DEFAULT_END_MARKER: &str = "</template>";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
    #[error("`{0}` must not be empty")]
    EmptyMarker(&'static str),
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    debug: bool,
    default_path: Utf8PathBuf,
    start_marker: String,
    end_marker: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            default_path: Utf8PathBuf::from(DEFAULT_PATH),
            start_marker: DEFAULT_START_MARKER.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
        }
    }
}

impl Settings {
    pub fn new(project_root: &Utf8Path) -> Result<Self, ConfigError> {
        let user_config_file = ProjectDirs::from("com.github", "tagcheck", "tagcheck")
            .and_then(|proj_dirs| {
                Utf8PathBuf::from_path_buf(proj_dirs.config_dir().join("tagcheck.toml")).ok()
            });

        Self::load_from_paths(project_root, user_config_file.as_deref())
    }

    fn load_from_paths(
        project_root: &Utf8Path,
        user_config_path: Option<&Utf8Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(
                File::from(path.as_std_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            File::from(project_root.join(".tagcheck.toml").as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join("tagcheck.toml").as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        settings.check()?;

        tracing::debug!(?settings, "loaded settings");
        Ok(settings)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.start_marker.is_empty() {
            return Err(ConfigError::EmptyMarker("start_marker"));
        }
        if self.end_marker.is_empty() {
            return Err(ConfigError::EmptyMarker("end_marker"));
        }
        Ok(())
    }

    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// File checked when no paths are given on the command line.
    #[must_use]
    pub fn default_path(&self) -> &Utf8Path {
        &self.default_path
    }

    #[must_use]
    pub fn start_marker(&self) -> &str {
        &self.start_marker
    }

    #[must_use]
    pub fn end_marker(&self) -> &str {
        &self.end_marker
    }
}
