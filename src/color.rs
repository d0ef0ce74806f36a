use std::collections::HashMap;

use palette::Srgb;

use crate::config::QUALITATIVE_PALETTE;

/// Plain RGB triple, kept free of UI types so charts can be serialised.
pub type Rgb = [u8; 3];

const DEFAULT_COLOR: Rgb = [160, 160, 160];

// ---------------------------------------------------------------------------
// Categorical palette
// ---------------------------------------------------------------------------

/// The `index`-th palette colour, wrapping around after the last one.
pub fn palette_color(index: usize) -> Rgb {
    let c: Srgb<u8> = QUALITATIVE_PALETTE[index % QUALITATIVE_PALETTE.len()];
    [c.red, c.green, c.blue]
}

// ---------------------------------------------------------------------------
// Color mapping: source tag → colour
// ---------------------------------------------------------------------------

/// Assigns palette colours to source tags in first-seen order, cycling
/// through the palette when there are more sources than colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: HashMap<String, Rgb>,
    default_color: Rgb,
}

impl ColorMap {
    pub fn new<'a>(sources: impl IntoIterator<Item = &'a str>) -> Self {
        let mut mapping: HashMap<String, Rgb> = HashMap::new();

        for source in sources {
            if !mapping.contains_key(source) {
                let color = palette_color(mapping.len());
                mapping.insert(source.to_string(), color);
            }
        }

        ColorMap {
            mapping,
            default_color: DEFAULT_COLOR,
        }
    }

    /// Look up the colour for a given source tag.
    pub fn color_for(&self, source: &str) -> Rgb {
        self.mapping
            .get(source)
            .copied()
            .unwrap_or(self.default_color)
    }
}
