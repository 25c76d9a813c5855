//! One-time registration of the "sans-serif" family for the `ab_glyph` text path.
//!
//! DejaVu Sans (regular and bold) is compiled into the crate. A TTF named by
//! [`FONT_ENV`] / [`BOLD_FONT_ENV`] replaces the bundled face when it parses.

use crate::error::{RenderError, Result};
use log::{debug, warn};
use plotters::style::{FontStyle, register_font};
use std::path::Path;
use std::sync::OnceLock;

/// Path to a regular-weight TTF to use instead of the bundled one.
pub const FONT_ENV: &str = "PERIOD_BARS_FONT";
/// Path to a bold TTF to use instead of the bundled one.
pub const BOLD_FONT_ENV: &str = "PERIOD_BARS_FONT_BOLD";

const FAMILY: &str = "sans-serif";
const BUNDLED_REGULAR: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
const BUNDLED_BOLD: &[u8] = include_bytes!("../../assets/DejaVuSans-Bold.ttf");

static FONTS_READY: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Register fonts on first call. Later calls return the first outcome.
pub fn ensure_fonts_registered() -> Result<()> {
    FONTS_READY
        .get_or_init(|| {
            register_face(FontStyle::Normal, FONT_ENV, BUNDLED_REGULAR, "regular")?;
            register_face(FontStyle::Bold, BOLD_FONT_ENV, BUNDLED_BOLD, "bold")
        })
        .clone()
        .map_err(RenderError::Font)
}

fn register_face(
    style: FontStyle,
    env_key: &str,
    bundled: &'static [u8],
    weight: &str,
) -> std::result::Result<(), String> {
    if let Some(path) = std::env::var_os(env_key) {
        let path = Path::new(&path);
        match read_font(path) {
            Some(bytes) if register_font(FAMILY, style, bytes).is_ok() => {
                debug!("using font {}", path.display());
                return Ok(());
            }
            _ => warn!(
                "{env_key}={} is not a usable TTF; using bundled DejaVu Sans",
                path.display()
            ),
        }
    }
    register_font(FAMILY, style, bundled)
        .map_err(|_| format!("bundled {weight} font could not be parsed"))
}

fn read_font(path: &Path) -> Option<&'static [u8]> {
    let bytes = std::fs::read(path).ok()?;
    if bytes.is_empty() {
        return None;
    }
    // Plotters keeps registered fonts for the life of the process.
    Some(Box::leak(bytes.into_boxed_slice()))
}
