use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;
use showcase_core::SimulationConfig;

/// One simulated operation shown by the demo.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DemoPreset {
    pub label: String,
    #[serde(default)]
    pub config: SimulationConfig,
}

pub fn builtin() -> Vec<DemoPreset> {
    vec![
        DemoPreset {
            label: "Upload".into(),
            config: SimulationConfig::upload(),
        },
        DemoPreset {
            label: "Download".into(),
            config: SimulationConfig::download(),
        },
        DemoPreset {
            label: "Install".into(),
            config: SimulationConfig::install(),
        },
    ]
}

/// Reads presets from a RON list, or the built-in set when no path is given.
pub fn load(path: Option<&Path>) -> anyhow::Result<Vec<DemoPreset>> {
    let Some(path) = path else {
        return Ok(builtin());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read presets {:?}", path))?;
    parse(&text).with_context(|| format!("invalid presets in {:?}", path))
}

pub fn parse(text: &str) -> anyhow::Result<Vec<DemoPreset>> {
    let presets: Vec<DemoPreset> = ron::from_str(text)?;
    if presets.is_empty() {
        bail!("no presets defined");
    }
    for preset in &presets {
        preset
            .config
            .validate()
            .with_context(|| format!("preset {:?}", preset.label))?;
    }
    Ok(presets)
}
