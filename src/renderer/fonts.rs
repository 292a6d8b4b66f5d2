use anyhow::{Context, Result};
use rusttype::{Font, Scale};
use std::fs;
use std::path::Path;

pub(crate) struct FontConfig {
    pub font: Font<'static>,
    pub scale: Scale,
}

/// The three text sizes used on the dashboard, all from one TTF file.
pub(crate) struct FontSet {
    pub title: FontConfig,
    pub regular: FontConfig,
    pub small: FontConfig,
}

impl FontSet {
    /// Load the dashboard font from a TTF file on disk.
    ///
    /// No font is bundled with the binary; the path comes from the
    /// `[DASHBOARD] font` setting.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .context(format!("Failed to read font file {}", path.display()))?;
        let font = Font::try_from_vec(bytes)
            .context(format!("Invalid font file {}", path.display()))?;

        Ok(Self {
            title: FontConfig {
                font: font.clone(),
                scale: Scale::uniform(26.0),
            },
            regular: FontConfig {
                font: font.clone(),
                scale: Scale::uniform(22.0),
            },
            small: FontConfig {
                font,
                scale: Scale::uniform(18.0),
            },
        })
    }
}
