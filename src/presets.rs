//////////////////////////////////////////////////////////////////////
// built-in tilings, one for each uniform tiling family we know how
// to draw nicely

use std::path::PathBuf;

use phf::phf_map;

use crate::errors::*;
use crate::pattern::TilingJob;
use crate::render::RenderSettings;
use crate::tiling::TilingSpec;

#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub symbol: (u32, u32, u32),
    pub distances: [f64; 3],
    pub extent: f64,
    pub depth: usize,
    pub face_colors: Option<&'static [u32]>, // None: default palette
}

// lookup table matching names to tilings
pub static PRESETS: phf::Map<&'static str, Preset> = phf_map! {
    "333-100" => Preset {
        symbol: (3, 3, 3), distances: [1.0, 0.0, 0.0], extent: 10.0, depth: 30,
        face_colors: Some(&[0x477984, 0x477984]),
    },
    "333-110" => Preset {
        symbol: (3, 3, 3), distances: [1.0, 1.0, 0.0], extent: 20.0, depth: 30,
        face_colors: Some(&[0xEEAA4D, 0x477984, 0x477984]),
    },
    "244-111" => Preset {
        symbol: (2, 4, 4), distances: [1.0, 1.0, 1.0], extent: 30.0, depth: 30,
        face_colors: None,
    },
    "244-011" => Preset {
        symbol: (2, 4, 4), distances: [0.0, 1.0, 1.0], extent: 25.0, depth: 30,
        face_colors: None,
    },
    "236-101" => Preset {
        symbol: (2, 3, 6), distances: [1.0, 0.0, 1.0], extent: 30.0, depth: 30,
        face_colors: None,
    },
    "236-111" => Preset {
        symbol: (2, 3, 6), distances: [1.2, 1.0, 0.8], extent: 30.0, depth: 50,
        face_colors: None,
    },
};

pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PRESETS.keys().copied().collect();
    names.sort_unstable();
    names
}

pub fn job(name: &str) -> Result<TilingJob> {

    let preset = match PRESETS.get(name) {
        Some(p) => p,
        None => bail!(ErrorKind::Configuration(
            format!("unknown preset \"{:}\", expected one of: {{\"{:}\"}}",
                    name, names().join("\", \"")))),
    };

    let defaults = RenderSettings::default();

    let settings = RenderSettings {
        extent: preset.extent,
        depth: preset.depth,
        face_colors: preset.face_colors.map(|c| c.to_vec()).or(defaults.face_colors.clone()),
        ..defaults
    };

    Ok(TilingJob {
        spec: TilingSpec::from_symbol(preset.symbol, preset.distances)?,
        settings,
        output: PathBuf::from(format!("{:}.png", name)),
    })

}

//////////////////////////////////////////////////////////////////////
