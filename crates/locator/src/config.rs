use crate::{
    constants::ENV_OUTPUT_DIR,
    error::{LocatorError, Result},
};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};

/// Main settings, read from TOML
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub write_csv: bool,
    pub write_png: bool,
    pub write_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("out"),
            write_csv: true,
            write_png: true,
            write_summary: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side length of the square output image [px]
    pub size_px: u32,
    /// Optional background, stretched over the whole map
    pub map_image: Option<PathBuf>,
    pub candidate_color: String,
    pub center_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size_px: 1024,
            map_image: None,
            candidate_color: "#FF999C".to_string(),
            center_color: "#0064FF".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn candidate_rgb(&self) -> Result<Rgb<u8>> {
        parse_hex_color(&self.candidate_color)
    }

    pub fn center_rgb(&self) -> Result<Rgb<u8>> {
        parse_hex_color(&self.center_color)
    }
}

impl Config {
    /// Load from a TOML file and validate. Missing keys take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LocatorError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            LocatorError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// `LOCATOR_OUTPUT_DIR` replaces `output.dir` when set and non-blank
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(output_dir) = env::var(ENV_OUTPUT_DIR)
            && !output_dir.trim().is_empty()
        {
            let path = PathBuf::from(output_dir);

            // If the path already exists but is not a directory, reject early.
            if path.exists() && !path.is_dir() {
                return Err(LocatorError::Config(format!(
                    "Output path is not a directory: {}",
                    path.display()
                )));
            }
            self.output.dir = path;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.render.size_px == 0 || self.render.size_px > 8192 {
            return Err(LocatorError::Config(format!(
                "render.size_px must be between 1 and 8192, got {}",
                self.render.size_px
            )));
        }

        self.render.candidate_rgb()?;
        self.render.center_rgb()?;

        if let Some(map) = &self.render.map_image
            && !map.is_file()
        {
            return Err(LocatorError::Config(format!(
                "render.map_image does not exist: {}",
                map.display()
            )));
        }

        if self.output.dir.as_os_str().is_empty() {
            return Err(LocatorError::Config("output.dir cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// `#RRGGBB` (leading `#` optional)
pub fn parse_hex_color(s: &str) -> Result<Rgb<u8>> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(LocatorError::Color(s.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| LocatorError::Color(s.to_string()))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}
