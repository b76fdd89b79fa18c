//! Font lookup for the image renderer
//!
//! Candidate files are tried in order; the first one that reads and parses
//! as a font supplies the family name and bytes handed to the rasterizer.
//! When nothing usable is found the font compiled into the binary is used,
//! so labels render even on hosts without any installed fonts.

use logger::debug;
use resvg::usvg::fontdb::{Database, Source};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Font compiled into the binary, used when no candidate file is usable
pub const BUILTIN_FONT: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");
/// Family name of [`BUILTIN_FONT`]
pub const BUILTIN_FAMILY: &str = "DejaVu Sans";

/// Default candidate font files, tried in order
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "C:/Windows/Fonts/arial.ttf",
    "C:/Windows/Fonts/segoeui.ttf",
];

/// Outcome of one font lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFont {
    /// Family name to reference from the scene
    pub family: String,
    /// Raw font file, `None` for the built-in font
    pub data: Option<Arc<Vec<u8>>>,
    /// File the font was loaded from
    pub source: Option<PathBuf>,
}

impl ResolvedFont {
    /// The built-in font
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            family: BUILTIN_FAMILY.to_string(),
            data: None,
            source: None,
        }
    }

    /// Whether this is the built-in font
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.data.is_none()
    }
}

/// Resolves and caches fonts per `(size, bold)`
#[derive(Debug, Default)]
pub struct FontResolver {
    candidates: Vec<PathBuf>,
    cache: Mutex<HashMap<(u32, bool), Arc<ResolvedFont>>>,
}

impl FontResolver {
    /// Create a resolver over the given candidate files
    #[must_use]
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Candidates in lookup order: files named `*Bold*` first for bold
    /// requests, last otherwise
    #[must_use]
    pub fn ordered_candidates(&self, bold: bool) -> Vec<&Path> {
        let (mut preferred, rest): (Vec<&Path>, Vec<&Path>) = self
            .candidates
            .iter()
            .map(PathBuf::as_path)
            .partition(|p| is_bold_file(p) == bold);
        preferred.extend(rest);
        preferred
    }

    /// Font for the given size and weight, cached after the first lookup
    pub fn resolve(&self, size: u32, bold: bool) -> Arc<ResolvedFont> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            cache
                .entry((size, bold))
                .or_insert_with(|| Arc::new(self.lookup(size, bold))),
        )
    }

    /// Number of cached entries
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn lookup(&self, size: u32, bold: bool) -> ResolvedFont {
        for path in self.ordered_candidates(bold) {
            match load_font(path) {
                Some(font) => {
                    debug!("Font {size}pt bold={bold}: '{}' from {}", font.family, path.display());
                    return font;
                }
                None => debug!("Font not usable at {}", path.display()),
            }
        }
        debug!("Font {size}pt bold={bold}: using built-in {BUILTIN_FAMILY}");
        ResolvedFont::builtin()
    }
}

/// Font database for the rasterizer
///
/// Always holds the built-in font, then the bytes of every resolved
/// candidate file, then the system fonts when `system_fonts` is set.
#[must_use]
pub fn build_database(fonts: &[Arc<ResolvedFont>], system_fonts: bool) -> Database {
    let mut db = Database::new();
    db.load_font_source(Source::Binary(Arc::new(BUILTIN_FONT)));
    for data in fonts.iter().filter_map(|font| font.data.as_ref()) {
        db.load_font_source(Source::Binary(Arc::clone(data) as _));
    }
    if system_fonts {
        db.load_system_fonts();
    }
    db
}

fn is_bold_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.contains("Bold"))
}

/// Read a font file and extract its family name
fn load_font(path: &Path) -> Option<ResolvedFont> {
    let data = std::fs::read(path).ok()?;
    let mut db = Database::new();
    db.load_font_data(data.clone());
    let family = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone())?;

    Some(ResolvedFont {
        family,
        data: Some(Arc::new(data)),
        source: Some(path.to_path_buf()),
    })
}
