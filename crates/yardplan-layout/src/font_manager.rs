//! System font lookup for canvas label text.
//!
//! Fonts are resolved through the system font database once and cached for
//! the life of the process. There is no bundled fallback: when no usable
//! sans-serif face exists, label drawing is skipped and geometry output is
//! unaffected.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::{
    collections::HashMap,
    fs,
    sync::{Mutex, OnceLock},
};
use tracing::warn;

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// Resolves a font face, preferring the named family and falling back to
/// the system sans-serif. Returns `None` when the system has no usable
/// face at all.
pub fn get_font_for(family: &str, bold: bool) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: family.to_string(),
        bold,
    };

    if let Some(entry) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return *entry;
    }

    let loaded = load_font_from_system(family, bold);
    let entry: Option<&'static Font<'static>> = loaded.map(|font| {
        let leaked: &'static Font<'static> = Box::leak(Box::new(font));
        leaked
    });
    if entry.is_none() {
        warn!(
            "No usable system font found for '{}'; canvas labels will be skipped",
            family
        );
    }

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, entry);
    entry
}

fn load_font_from_system(family: &str, bold: bool) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

/// The default label font (system sans-serif).
pub fn get_font() -> Option<&'static Font<'static>> {
    get_font_for("Sans", false)
}
