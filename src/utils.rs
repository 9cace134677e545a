//! Utility functions

use crate::constants::APP_NAME;
use std::path::PathBuf;

// Square chain-link mark, used for the window/taskbar icon
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#2563eb"/><stop offset="1" stop-color="#9333ea"/></linearGradient></defs><rect width="64" height="64" rx="14" fill="url(#g)"/><path d="M27 37l10-10" stroke="#fff" stroke-width="5" stroke-linecap="round"/><path d="M30 20l4-4a9 9 0 0 1 13 13l-4 4M34 44l-4 4a9 9 0 0 1-13-13l4-4" fill="none" stroke="#fff" stroke-width="5" stroke-linecap="round"/></svg>"##;

/// Rasterize the icon SVG to a square RGBA image.
pub fn rasterize_icon(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Creation timestamp in local time, or the raw value if it is not RFC 3339
pub fn format_created_at(raw: &str) -> String {
    format_timestamp(raw, &chrono::Local)
}

fn format_timestamp<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Cut to `max_chars` characters, marking the cut with an ellipsis
pub fn truncate_end(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_reformatted() {
        assert_eq!(
            format_timestamp("2024-06-04T12:30:45.123Z", &chrono::Utc),
            "2024-06-04 12:30"
        );
    }

    #[test]
    fn unparsable_timestamp_passes_through() {
        assert_eq!(format_created_at("yesterday"), "yesterday");
        assert_eq!(format_created_at(""), "");
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_end("https://a.b", 20), "https://a.b");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_end("héllo wörld", 6), "héllo…");
    }

    #[test]
    fn icon_rasterizes_to_requested_size() {
        let (pixels, w, h) = rasterize_icon(32).unwrap();
        assert_eq!((w, h), (32, 32));
        assert_eq!(pixels.len(), 32 * 32 * 4);
    }
}
