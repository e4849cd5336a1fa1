use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use whitted::{camera::Sampling, tracer::TracerOptions};

/// Render settings, read from a TOML file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,

    /// Render workers. 0 picks a count from the available cores.
    pub threads: usize,

    pub output: PathBuf,
    pub sampling: Sampling,
    pub tracer: TracerOptions,

    /// Draw a grid line every this many pixels over the render. 0 draws none.
    pub grid: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            threads: 0,
            output: PathBuf::from("render.png"),
            sampling: Sampling::default(),
            tracer: TracerOptions::default(),
            grid: 0,
        }
    }
}

impl RenderConfig {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| format!("could not read {}", path))?;
        Self::parse(&contents).with_context(|| format!("invalid config file {}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
