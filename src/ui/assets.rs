//! Filesystem-based asset source and the piece image set.
//!
//! Piece images are checked once, before the first frame, by
//! [`PieceImages::load`]. Anything missing is reported then and drawn as a
//! Unicode glyph afterwards; rendering never touches the filesystem to find
//! out whether an image exists.

use gpui::{AssetSource, SharedString};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Piece, PieceColor, PieceKind};

/// Filesystem-based asset source that looks for assets in multiple locations
pub struct FileAssets {
    base_path: Option<PathBuf>,
}

impl FileAssets {
    pub fn new() -> Self {
        let base_path = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));
        Self { base_path }
    }

    fn candidates(&self, path: &str) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(base) = &self.base_path {
            paths.push(base.join(path));
        }
        paths.push(PathBuf::from(path));
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(path));
        }
        paths
    }
}

impl Default for FileAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for FileAssets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        for p in self.candidates(path) {
            if let Ok(data) = fs::read(&p) {
                return Ok(Some(Cow::Owned(data)));
            }
        }
        Ok(None)
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        let mut results = Vec::new();
        for dir_path in self.candidates(path) {
            if let Ok(entries) = fs::read_dir(&dir_path) {
                for entry in entries.flatten() {
                    if let Some(name) = entry.file_name().to_str() {
                        results.push(SharedString::from(name.to_string()));
                    }
                }
                break;
            }
        }
        Ok(results)
    }
}

const ALL_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
];

fn kind_file_name(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::Pawn => "pawn",
        PieceKind::Rook => "rook",
        PieceKind::Knight => "knight",
        PieceKind::Bishop => "bishop",
        PieceKind::Queen => "queen",
        PieceKind::King => "king",
    }
}

/// Asset path of a piece image, e.g. `assets/knight-black.svg`
pub fn piece_image_path(dir: &Path, piece: Piece) -> String {
    let color = match piece.color {
        PieceColor::White => "white",
        PieceColor::Black => "black",
    };
    let file = format!("{}-{}.svg", kind_file_name(piece.kind), color);
    dir.join(file).to_string_lossy().into_owned()
}

/// The piece images that were found during the load phase
#[derive(Clone, Debug, Default)]
pub struct PieceImages {
    paths: HashMap<Piece, SharedString>,
}

impl PieceImages {
    /// Probe all twelve piece images through `source`
    pub fn load(source: &dyn AssetSource, dir: &Path) -> Self {
        let mut paths = HashMap::new();
        for color in [PieceColor::White, PieceColor::Black] {
            for kind in ALL_KINDS {
                let piece = Piece::new(color, kind);
                let path = piece_image_path(dir, piece);
                match source.load(&path) {
                    Ok(Some(_)) => {
                        paths.insert(piece, SharedString::from(path));
                    }
                    Ok(None) => tracing::warn!("Asset missing: {path}; drawing a glyph instead"),
                    Err(e) => tracing::warn!("Asset {path} failed to load: {e}"),
                }
            }
        }
        tracing::info!("Loaded {} of 12 piece images from {}", paths.len(), dir.display());
        Self { paths }
    }

    /// Image for `piece`, if it was found
    pub fn image_for(&self, piece: Piece) -> Option<SharedString> {
        self.paths.get(&piece).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serves only the white pieces
    struct WhiteOnly;

    impl AssetSource for WhiteOnly {
        fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
            Ok(path
                .contains("-white")
                .then(|| Cow::Borrowed(&b"<svg/>"[..])))
        }

        fn list(&self, _path: &str) -> gpui::Result<Vec<SharedString>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_image_path() {
        let piece = Piece::new(PieceColor::Black, PieceKind::Knight);
        assert_eq!(
            piece_image_path(Path::new("assets"), piece),
            Path::new("assets")
                .join("knight-black.svg")
                .to_string_lossy()
        );
    }

    #[test]
    fn test_missing_images_fall_back() {
        let images = PieceImages::load(&WhiteOnly, Path::new("assets"));
        let white_queen = Piece::new(PieceColor::White, PieceKind::Queen);
        let black_queen = Piece::new(PieceColor::Black, PieceKind::Queen);
        assert!(images.image_for(white_queen).is_some());
        assert!(images.image_for(black_queen).is_none());
    }

    #[test]
    fn test_file_assets_missing_file() {
        let assets = FileAssets::new();
        assert!(assets.load("no/such/asset.svg").unwrap().is_none());
    }
}
