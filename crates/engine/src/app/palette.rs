//! Colour values and the character palette.
//!
//! A [`Palette`] is always complete. Per-character variation is expressed as a
//! [`PalettePatch`] whose set fields replace the matching base colour.

pub type Rgba = [u8; 4];

pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    [r, g, b, 255]
}

pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba {
    [r, g, b, a]
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
pub fn parse_hex_color(raw: &str) -> Option<Rgba> {
    let hex = raw.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let expanded = match hex.len() {
        3 => hex.chars().flat_map(|ch| [ch, ch]).collect::<String>(),
        6 | 8 => hex.to_string(),
        _ => return None,
    };
    let channel = |index: usize| u8::from_str_radix(&expanded[index..index + 2], 16).ok();
    let alpha = if expanded.len() == 8 { channel(6)? } else { 255 };
    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}

/// Linear blend of the colour channels; alpha is taken from `a`.
pub fn mix(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let lerp = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * t).round() as u8;
    [lerp(a[0], b[0]), lerp(a[1], b[1]), lerp(a[2], b[2]), a[3]]
}

pub fn with_alpha(color: Rgba, alpha: u8) -> Rgba {
    [color[0], color[1], color[2], alpha]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub hair: Rgba,
    pub hair_hi: Rgba,
    pub skin: Rgba,
    pub skin_hi: Rgba,
    pub outline: Rgba,
    pub eye: Rgba,
    pub outfit: Rgba,
    pub outfit_hi: Rgba,
    pub trim: Rgba,
    pub boot: Rgba,
    pub scarf: Rgba,
}

impl Palette {
    pub const BASE: Palette = Palette {
        hair: rgb(43, 29, 20),
        hair_hi: rgb(106, 74, 48),
        skin: rgb(242, 231, 218),
        skin_hi: rgb(255, 245, 234),
        outline: rgb(11, 15, 26),
        eye: rgb(12, 18, 32),
        outfit: rgb(31, 41, 55),
        outfit_hi: rgb(58, 74, 99),
        trim: rgb(154, 195, 255),
        boot: rgb(138, 160, 182),
        scarf: rgb(193, 70, 70),
    };

    pub fn with_patch(&self, patch: &PalettePatch) -> Palette {
        Palette {
            hair: patch.hair.unwrap_or(self.hair),
            hair_hi: patch.hair_hi.unwrap_or(self.hair_hi),
            skin: patch.skin.unwrap_or(self.skin),
            skin_hi: patch.skin_hi.unwrap_or(self.skin_hi),
            outline: patch.outline.unwrap_or(self.outline),
            eye: patch.eye.unwrap_or(self.eye),
            outfit: patch.outfit.unwrap_or(self.outfit),
            outfit_hi: patch.outfit_hi.unwrap_or(self.outfit_hi),
            trim: patch.trim.unwrap_or(self.trim),
            boot: patch.boot.unwrap_or(self.boot),
            scarf: patch.scarf.unwrap_or(self.scarf),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::BASE
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PalettePatch {
    pub hair: Option<Rgba>,
    pub hair_hi: Option<Rgba>,
    pub skin: Option<Rgba>,
    pub skin_hi: Option<Rgba>,
    pub outline: Option<Rgba>,
    pub eye: Option<Rgba>,
    pub outfit: Option<Rgba>,
    pub outfit_hi: Option<Rgba>,
    pub trim: Option<Rgba>,
    pub boot: Option<Rgba>,
    pub scarf: Option<Rgba>,
}
