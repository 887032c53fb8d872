use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.) as u8,
            g: (g.clamp(0.0, 1.0) * 255.) as u8,
            b: (b.clamp(0.0, 1.0) * 255.) as u8,
            a: (a.clamp(0.0, 1.0) * 255.) as u8,
        }
    }

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.)
    }

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const WHITE: Color = Color::from_rgb8(255, 255, 255);

    /// Linear per-channel interpolation, `t` clamped to `0..=1`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: ch(self.a, other.a),
        }
    }
}

/// Formats as a CSS color (`#rrggbb`, or `rgba(..)` when translucent).
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.
            )
        }
    }
}

pub trait ColorPalette: dyn_clone::DynClone {
    /// This function is expected to give the same answer for the same input (i.e. be a pure fn).
    fn color(&self, index: usize) -> Color;
}

dyn_clone::clone_trait_object!(ColorPalette);

/// The fixed 12-color categorical palette used for slices and legend markers.
pub const SET3: [Color; 12] = [
    Color::from_rgb8(0x8d, 0xd3, 0xc7),
    Color::from_rgb8(0xff, 0xff, 0xb3),
    Color::from_rgb8(0xbe, 0xba, 0xda),
    Color::from_rgb8(0xfb, 0x80, 0x72),
    Color::from_rgb8(0x80, 0xb1, 0xd3),
    Color::from_rgb8(0xfd, 0xb4, 0x62),
    Color::from_rgb8(0xb3, 0xde, 0x69),
    Color::from_rgb8(0xfc, 0xcd, 0xe5),
    Color::from_rgb8(0xd9, 0xd9, 0xd9),
    Color::from_rgb8(0xbc, 0x80, 0xbd),
    Color::from_rgb8(0xcc, 0xeb, 0xc5),
    Color::from_rgb8(0xff, 0xed, 0x6f),
];

#[derive(Copy, Clone)]
pub struct Set3Palette;

impl ColorPalette for Set3Palette {
    fn color(&self, index: usize) -> Color {
        // wraps past the twelfth entry
        SET3[index % SET3.len()]
    }
}

/// Ordinal name → color scale.
///
/// The domain holds distinct names in order of first appearance and is
/// replaced wholesale on every chart update, so a name's color is stable for
/// as long as the name stays in the data.
pub struct OrdinalScale {
    domain: Vec<String>,
    palette: Box<dyn ColorPalette + Send + Sync>,
}

impl OrdinalScale {
    pub fn new(palette: Box<dyn ColorPalette + Send + Sync>) -> Self {
        Self {
            domain: Vec::new(),
            palette,
        }
    }

    /// Replace the domain with the distinct names in `names`, keeping first
    /// appearance order.
    pub fn set_domain<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.domain.clear();
        for name in names {
            if !self.domain.iter().any(|n| n == name) {
                self.domain.push(name.to_owned());
            }
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn color(&self, name: &str) -> Color {
        let index = self
            .domain
            .iter()
            .position(|n| n == name)
            .unwrap_or(self.domain.len());
        self.palette.color(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_keeps_first_appearance_order() {
        let mut scale = OrdinalScale::new(Box::new(Set3Palette));
        scale.set_domain(["bread", "milk", "bread", "eggs"]);
        assert_eq!(scale.domain(), ["bread", "milk", "eggs"]);
        assert_eq!(scale.color("bread"), SET3[0]);
        assert_eq!(scale.color("milk"), SET3[1]);
        assert_eq!(scale.color("eggs"), SET3[2]);
    }

    #[test]
    fn color_is_stable_per_name_across_updates() {
        let mut scale = OrdinalScale::new(Box::new(Set3Palette));
        scale.set_domain(["milk", "eggs"]);
        let milk = scale.color("milk");
        scale.set_domain(["milk", "eggs", "flour"]);
        assert_eq!(scale.color("milk"), milk);
    }

    #[test]
    fn palette_wraps_past_twelve() {
        let palette = Set3Palette;
        assert_eq!(palette.color(12), palette.color(0));
        assert_eq!(palette.color(25), palette.color(1));
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Color::from_rgb8(10, 20, 30);
        let b = Color::from_rgb8(200, 100, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn css_formatting() {
        assert_eq!(Color::from_rgb8(0x24, 0x36, 0x42).to_string(), "#243642");
        assert_eq!(
            Color { r: 0, g: 0, b: 0, a: 0 }.to_string(),
            "rgba(0,0,0,0.000)"
        );
    }
}
