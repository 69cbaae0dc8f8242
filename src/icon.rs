//! Icon generation collaborators
//!
//! The persistence core treats icons as opaque bytes and never validates
//! their format. When a caller constructs a folder without an icon, an
//! `IconSource` supplies default bytes from a short glyph (an emoji or a
//! character or two of text).

use crate::Result;

/// Produces icon bytes for a glyph. Implementations may render locally or
/// fetch from the network; the store only requires non-empty bytes.
pub trait IconSource {
    fn icon_bytes(&self, glyph: &str) -> Result<Vec<u8>>;
}

/// Renders the glyph centered on a small square SVG canvas.
///
/// SVG keeps the badge generation dependency-free while still producing a
/// real image the browser side can display directly.
#[derive(Debug, Clone)]
pub struct GlyphBadge {
    size: u32,
}

impl GlyphBadge {
    pub fn new() -> Self {
        Self { size: 16 }
    }

    /// Badge with a custom canvas size in pixels
    pub fn with_size(size: u32) -> Self {
        Self { size }
    }
}

impl Default for GlyphBadge {
    fn default() -> Self {
        Self::new()
    }
}

impl IconSource for GlyphBadge {
    fn icon_bytes(&self, glyph: &str) -> Result<Vec<u8>> {
        let size = self.size;
        let font_size = size.saturating_sub(2).max(1);
        let svg = format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
                r#"<text x="50%" y="50%" dominant-baseline="central" text-anchor="middle" font-size="{font_size}">{glyph}</text>"#,
                "</svg>"
            ),
            size = size,
            font_size = font_size,
            glyph = escape_xml(glyph),
        );
        Ok(svg.into_bytes())
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
