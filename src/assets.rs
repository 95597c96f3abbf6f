//! Image assets
//!
//! Images live in `assets/images/<set>/NN.png`, where a set is a tile type
//! (`tiles/grass`), the cloud pool (`clouds`) or one animation
//! (`entities/player/run`). The build script lists every set in
//! `assets/images/manifest.txt` so loading works the same on WASM, where
//! directories can't be enumerated.

use std::collections::{BTreeMap, HashMap};

use macroquad::file::load_string;
use macroquad::texture::{load_texture, FilterMode, Texture2D};
use thiserror::Error;
use tracing::{debug, info};

use crate::game::{Action, ClipTable};

/// Root of the image tree
pub const IMAGES_DIR: &str = "assets/images";

/// Manifest written by build.rs
pub const MANIFEST_FILE: &str = "manifest.txt";

/// Drawn behind everything, not part of any set
pub const BACKGROUND_FILE: &str = "background.png";

/// Set holding the cloud images
pub const CLOUDS: &str = "clouds";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: macroquad::Error,
    },
    #[error("bad manifest: {0}")]
    Manifest(String),
}

/// Parse the manifest into set name -> sorted file names.
///
/// Format: a `[set]` header line followed by one file name per line.
/// Blank lines and `#` comments are ignored.
pub fn parse_manifest(text: &str) -> Result<BTreeMap<String, Vec<String>>, AssetError> {
    let mut sets: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut current: Option<String> = None;

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if name.is_empty() {
                return Err(AssetError::Manifest(format!("line {}: empty set name", number + 1)));
            }
            sets.entry(name.to_string()).or_default();
            current = Some(name.to_string());
            continue;
        }
        let Some(set) = &current else {
            return Err(AssetError::Manifest(format!(
                "line {}: file '{}' before any [set] header",
                number + 1,
                line
            )));
        };
        if let Some(files) = sets.get_mut(set) {
            files.push(line.to_string());
        }
    }

    for files in sets.values_mut() {
        files.sort();
    }
    Ok(sets)
}

/// Set name for an actor animation
pub fn animation_set(actor: &str, action: Action) -> String {
    format!("entities/{}/{}", actor, action.name())
}

/// Set name for a tile type
pub fn tile_set(kind: &str) -> String {
    format!("tiles/{}", kind)
}

/// Fill in frame counts from how many images each animation set has
pub fn clip_table_with_counts(mut clips: ClipTable, count: impl Fn(Action) -> usize) -> ClipTable {
    for action in Action::ALL {
        let frames = count(action);
        if frames > 0 {
            clips.set(action, clips.get(action).with_frames(frames));
        }
    }
    clips
}

async fn texture(path: String) -> Result<Texture2D, AssetError> {
    let texture = load_texture(&path)
        .await
        .map_err(|source| AssetError::Load { path, source })?;
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

/// Loaded textures keyed by set name
pub struct Assets {
    pub background: Texture2D,
    sets: HashMap<String, Vec<Texture2D>>,
}

impl Assets {
    /// Load the background and every set in the manifest
    pub async fn load() -> Result<Self, AssetError> {
        let manifest_path = format!("{}/{}", IMAGES_DIR, MANIFEST_FILE);
        let manifest = load_string(&manifest_path)
            .await
            .map_err(|source| AssetError::Load {
                path: manifest_path.clone(),
                source,
            })?;

        let background = texture(format!("{}/{}", IMAGES_DIR, BACKGROUND_FILE)).await?;

        let mut sets = HashMap::new();
        let mut image_count = 0;
        for (set, files) in parse_manifest(&manifest)? {
            let mut images = Vec::with_capacity(files.len());
            for file in &files {
                images.push(texture(format!("{}/{}/{}", IMAGES_DIR, set, file)).await?);
            }
            debug!(set = %set, images = images.len(), "loaded image set");
            image_count += images.len();
            sets.insert(set, images);
        }

        info!(sets = sets.len(), images = image_count, "assets loaded");
        Ok(Self { background, sets })
    }

    /// Images of a set, empty if the set doesn't exist
    pub fn images(&self, set: &str) -> &[Texture2D] {
        self.sets.get(set).map(Vec::as_slice).unwrap_or(&[])
    }

    /// One image of a set; indexes past the end wrap
    pub fn image(&self, set: &str, index: usize) -> Option<&Texture2D> {
        let images = self.images(set);
        if images.is_empty() {
            None
        } else {
            images.get(index % images.len())
        }
    }

    /// Clip table for an actor with frame counts taken from its image sets
    pub fn clip_table(&self, actor: &str, defaults: ClipTable) -> ClipTable {
        clip_table_with_counts(defaults, |action| self.images(&animation_set(actor, action)).len())
    }

    pub fn cloud_count(&self) -> usize {
        self.images(CLOUDS).len()
    }
}
