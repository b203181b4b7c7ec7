//! Startup texture loading for the three material maps.
//!
//! Each map is read and decoded on its own background thread; completions
//! cross back to the main thread over a channel and are drained once per
//! frame. A failed load logs one error and leaves its map in the failed
//! state for the process lifetime — there is no retry, and the other maps
//! are unaffected.
//!
//! # Invariants
//! - Per map: loading → loaded | failed, no other transitions.
//! - Exactly one completion (and at most one error log) per request.
//! - Only `poll` mutates state after `request`, so all state changes
//!   happen on the caller's thread.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Which of the three material maps a texture feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureKind {
    Color,
    Roughness,
    Normal,
}

impl TextureKind {
    pub const ALL: [Self; 3] = [Self::Color, Self::Roughness, Self::Normal];

    /// File name under the asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Color => "color.jpg",
            Self::Roughness => "roughness.jpg",
            Self::Normal => "normal.png",
        }
    }

    /// Short name used in log messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Roughness => "roughness",
            Self::Normal => "normal",
        }
    }
}

/// A decoded RGBA8 image ready for GPU upload.
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub kind: TextureKind,
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

/// Errors from reading or decoding a texture file.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),
}

/// Load state of one map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed,
}

struct Completion {
    kind: TextureKind,
    result: Result<TextureImage, AssetError>,
}

/// Issues background loads and hands finished images to the main thread.
pub struct TextureLoader {
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    states: BTreeMap<TextureKind, LoadState>,
}

impl TextureLoader {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            states: BTreeMap::new(),
        }
    }

    /// Request all three maps from `dir` under their fixed file names.
    pub fn request_studio_maps(&mut self, dir: &Path) {
        for kind in TextureKind::ALL {
            self.request(kind, dir.join(kind.file_name()));
        }
    }

    /// Start one background load. Re-requesting a kind resets it to loading.
    pub fn request(&mut self, kind: TextureKind, path: PathBuf) {
        self.states.insert(kind, LoadState::Loading);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = load_file(kind, &path);
            // Receiver only disappears on shutdown; nothing to do then.
            let _ = tx.send(Completion { kind, result });
        });
    }

    /// Drain finished loads. Returns the successfully decoded images;
    /// failures are logged here (once per request) and recorded as failed.
    pub fn poll(&mut self) -> Vec<TextureImage> {
        let mut done = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            match completion.result {
                Ok(image) => {
                    self.states.insert(completion.kind, LoadState::Loaded);
                    tracing::debug!(
                        "loaded {} texture ({}x{})",
                        completion.kind.name(),
                        image.width,
                        image.height
                    );
                    done.push(image);
                }
                Err(e) => {
                    tracing::error!("error loading {} texture: {e}", completion.kind.name());
                    self.states.insert(completion.kind, LoadState::Failed);
                }
            }
        }
        done
    }

    /// Load state of a map, if it was ever requested.
    pub fn state(&self, kind: TextureKind) -> Option<LoadState> {
        self.states.get(&kind).copied()
    }

    /// True once no requested map is still loading.
    pub fn settled(&self) -> bool {
        self.states.values().all(|s| *s != LoadState::Loading)
    }
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_file(kind: TextureKind, path: &Path) -> Result<TextureImage, AssetError> {
    let bytes = std::fs::read(path)?;
    decode(kind, &bytes)
}

/// Decode PNG/JPEG bytes to a tightly packed RGBA8 image.
pub fn decode(kind: TextureKind, bytes: &[u8]) -> Result<TextureImage, AssetError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    Ok(TextureImage {
        kind,
        width: decoded.width(),
        height: decoded.height(),
        pixels: decoded.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    /// Encode a small solid-color PNG in memory.
    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn poll_until_settled(loader: &mut TextureLoader) -> Vec<TextureImage> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut images = Vec::new();
        while !loader.settled() {
            assert!(Instant::now() < deadline, "loader never settled");
            images.extend(loader.poll());
            thread::sleep(Duration::from_millis(5));
        }
        images.extend(loader.poll());
        images
    }

    #[test]
    fn decode_png_yields_rgba8() {
        let img = decode(TextureKind::Color, &png_bytes(4, 3)).unwrap();
        assert_eq!((img.width, img.height), (4, 3));
        assert_eq!(img.pixels.len(), 4 * 3 * 4);
        assert_eq!(&img.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn decode_garbage_fails() {
        let err = decode(TextureKind::Normal, b"not an image").unwrap_err();
        assert!(matches!(err, AssetError::Decode(_)));
    }

    #[test]
    fn missing_file_becomes_failed() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = TextureLoader::new();
        loader.request(TextureKind::Color, dir.path().join("color.jpg"));

        let images = poll_until_settled(&mut loader);
        assert!(images.is_empty());
        assert_eq!(loader.state(TextureKind::Color), Some(LoadState::Failed));
    }

    #[test]
    fn one_failure_does_not_block_the_others() {
        let dir = tempfile::tempdir().unwrap();
        // Only the color map exists; decoder sniffs content, so PNG bytes
        // under a .jpg name are fine.
        std::fs::write(dir.path().join("color.jpg"), png_bytes(2, 2)).unwrap();

        let mut loader = TextureLoader::new();
        loader.request_studio_maps(dir.path());

        let images = poll_until_settled(&mut loader);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].kind, TextureKind::Color);
        assert_eq!(loader.state(TextureKind::Color), Some(LoadState::Loaded));
        assert_eq!(loader.state(TextureKind::Roughness), Some(LoadState::Failed));
        assert_eq!(loader.state(TextureKind::Normal), Some(LoadState::Failed));
    }

    #[test]
    fn states_are_terminal_after_settle() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("normal.png"), png_bytes(2, 2)).unwrap();

        let mut loader = TextureLoader::new();
        loader.request(TextureKind::Normal, dir.path().join("normal.png"));
        poll_until_settled(&mut loader);

        assert_eq!(loader.state(TextureKind::Normal), Some(LoadState::Loaded));
        // Further polls deliver nothing and change nothing.
        assert!(loader.poll().is_empty());
        assert_eq!(loader.state(TextureKind::Normal), Some(LoadState::Loaded));
    }

    #[test]
    fn fixed_file_names() {
        assert_eq!(TextureKind::Color.file_name(), "color.jpg");
        assert_eq!(TextureKind::Roughness.file_name(), "roughness.jpg");
        assert_eq!(TextureKind::Normal.file_name(), "normal.png");
    }
}
