//! Deterministic account identicons.
//!
//! Reproduces the Jazzicon layout used by wallet UIs so an address renders
//! with the same colours and geometry here and in the browser: a hue-shifted
//! palette, a background colour and three rotated squares, all drawn from an
//! MT19937 stream seeded with the first four bytes of the address.

pub mod color;

use std::f64::consts::PI;
use std::fmt::Write;

use alloy::primitives::Address;
use rand_mt::Mt;

use self::color::Rgb;

/// Base palette, before the per-address hue shift.
pub const PALETTE: [&str; 10] = [
    "#01888C", "#FC7500", "#034F5D", "#F73F01", "#FC1960", "#C7144C", "#F3C100", "#1598F2",
    "#2465E1", "#F19E02",
];

const SHAPE_COUNT: usize = 4;
const WOBBLE: f64 = 30.0;

/// Accepted diameters in pixels.
pub const MIN_SIZE: u32 = 8;
pub const MAX_SIZE: u32 = 512;

/// Seed derived from an address: its first four bytes, big-endian.
pub fn seed_for_address(address: &Address) -> u32 {
    let bytes = address.as_slice();
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// One rotated square.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotation: f64,
    pub fill: Rgb,
}

/// A generated identicon, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Identicon {
    pub diameter: u32,
    pub background: Rgb,
    pub shapes: Vec<Shape>,
}

struct Generator {
    mt: Mt,
}

impl Generator {
    fn new(seed: u32) -> Self {
        Self { mt: Mt::new(seed) }
    }

    /// Uniform value in [0, 1) with 32 bits of precision.
    fn random(&mut self) -> f64 {
        f64::from(self.mt.next_u32()) * (1.0 / 4_294_967_296.0)
    }

    /// Picks and removes a colour. The first draw is discarded to stay in
    /// step with the browser implementation.
    fn take_color(&mut self, remaining: &mut Vec<Rgb>) -> Rgb {
        let _ = self.random();
        let idx = (remaining.len() as f64 * self.random()).floor() as usize;
        remaining.remove(idx.min(remaining.len() - 1))
    }
}

impl Identicon {
    /// Generate the identicon of `address` at `diameter` pixels.
    pub fn for_address(address: &Address, diameter: u32) -> Self {
        Self::from_seed(seed_for_address(address), diameter)
    }

    pub fn from_seed(seed: u32, diameter: u32) -> Self {
        let mut generator = Generator::new(seed);

        let amount = generator.random() * WOBBLE - WOBBLE / 2.0;
        let mut remaining: Vec<Rgb> = PALETTE
            .iter()
            .filter_map(|hex| Rgb::from_hex(hex))
            .map(|c| c.rotate_hue(amount))
            .collect();

        let background = generator.take_color(&mut remaining);

        let d = f64::from(diameter);
        let total = (SHAPE_COUNT - 1) as f64;
        let shapes = (0..SHAPE_COUNT - 1)
            .map(|i| {
                let first_rot = generator.random();
                let angle = PI * 2.0 * first_rot;
                let velocity = d / total * generator.random() + (i as f64 * d / total);
                let second_rot = generator.random();
                Shape {
                    translate_x: angle.cos() * velocity,
                    translate_y: angle.sin() * velocity,
                    rotation: first_rot * 360.0 + second_rot * 180.0,
                    fill: generator.take_color(&mut remaining),
                }
            })
            .collect();

        Self {
            diameter,
            background,
            shapes,
        }
    }

    /// Render as a standalone circular SVG document.
    pub fn to_svg(&self) -> String {
        let d = self.diameter;
        let center = f64::from(d) / 2.0;
        let mut svg = String::with_capacity(512);

        // Writing into a String cannot fail.
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{d}" height="{d}" viewBox="0 0 {d} {d}">"#
        );
        let _ = write!(
            svg,
            r#"<defs><clipPath id="jazzicon"><circle cx="{center}" cy="{center}" r="{center}"/></clipPath></defs>"#
        );
        let _ = write!(
            svg,
            r#"<g clip-path="url(#jazzicon)"><rect x="0" y="0" width="{d}" height="{d}" fill="{}"/>"#,
            self.background
        );
        for shape in &self.shapes {
            let _ = write!(
                svg,
                r#"<rect x="0" y="0" width="{d}" height="{d}" transform="translate({} {}) rotate({:.1} {center} {center})" fill="{}"/>"#,
                shape.translate_x, shape.translate_y, shape.rotation, shape.fill
            );
        }
        svg.push_str("</g></svg>");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_mt::Mt;

    fn addr(hex: &str) -> Address {
        hex.parse().unwrap()
    }

    #[test]
    fn test_generator_is_mt19937() {
        // Reference output of MT19937 for its canonical default seed.
        let mut mt = Mt::new(5489);
        assert_eq!(mt.next_u32(), 3_499_211_612);
    }

    #[test]
    fn test_seed_uses_leading_bytes() {
        let a = addr("0x12345678aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        assert_eq!(seed_for_address(&a), 0x1234_5678);

        let b = addr("0x12345678bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
        assert_eq!(
            Identicon::for_address(&a, 24),
            Identicon::for_address(&b, 24)
        );
    }

    #[test]
    fn test_deterministic() {
        let a = addr("0xd8da6bf26964af9d7eed9e03e53415d37aa96045");
        let first = Identicon::for_address(&a, 32);
        let second = Identicon::for_address(&a, 32);
        assert_eq!(first, second);
        assert_eq!(first.to_svg(), second.to_svg());
    }

    #[test]
    fn test_matches_browser_jazzicon() {
        let icon = Identicon::for_address(&addr("0xd8da6bf26964af9d7eed9e03e53415d37aa96045"), 32);
        assert_eq!(icon.background.to_string(), "#C81476");

        let expected = [
            (-0.8177970726815054, 2.5804420228850504, "204.4", "#2391E1"),
            (11.577886105991157, -10.16648375020057, "424.9", "#FB1894"),
            (-30.88446043686486, -7.827255866866888, "366.6", "#018E73"),
        ];
        assert_eq!(icon.shapes.len(), expected.len());
        for (shape, (tx, ty, rotation, fill)) in icon.shapes.iter().zip(expected) {
            assert!((shape.translate_x - tx).abs() < 1e-9, "{} != {}", shape.translate_x, tx);
            assert!((shape.translate_y - ty).abs() < 1e-9, "{} != {}", shape.translate_y, ty);
            assert_eq!(format!("{:.1}", shape.rotation), rotation);
            assert_eq!(shape.fill.to_string(), fill);
        }

        let svg = icon.to_svg();
        assert!(svg.contains(r##"height="32" fill="#C81476"/>"##));
        assert!(svg.contains("rotate(204.4 16 16)"));
        assert!(svg.contains(r##"fill="#018E73"/></g></svg>"##));
    }

    #[test]
    fn test_distinct_addresses_differ() {
        let a = Identicon::for_address(&addr("0x1111111111111111111111111111111111111111"), 24);
        let b = Identicon::for_address(&addr("0x2222222222222222222222222222222222222222"), 24);
        assert_ne!(a, b);
    }

    #[test]
    fn test_colours_are_distinct_palette_picks() {
        let icon = Identicon::from_seed(42, 24);
        assert_eq!(icon.shapes.len(), SHAPE_COUNT - 1);

        let mut fills: Vec<String> = icon.shapes.iter().map(|s| s.fill.to_string()).collect();
        fills.push(icon.background.to_string());
        let count = fills.len();
        fills.sort();
        fills.dedup();
        assert_eq!(fills.len(), count);
    }

    #[test]
    fn test_svg_shape() {
        let svg = Identicon::from_seed(7, 16).to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"width="16""#));
        assert_eq!(svg.matches("<rect").count(), SHAPE_COUNT);
    }
}
