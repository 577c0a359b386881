//! RGB/HSL conversion for palette hue shifting.
//!
//! Follows the `color-convert` conventions used by browser identicons: the
//! source colour is reduced to whole-number HSL (degrees, percent, percent),
//! the hue is shifted, and the result is rounded back to 8-bit channels.

use std::fmt;

/// An sRGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Rotate the hue by `degrees`, keeping saturation and lightness.
    ///
    /// Even a zero rotation can move a channel by one step, since the
    /// colour passes through integer HSL.
    pub fn rotate_hue(self, degrees: f64) -> Self {
        let (h, s, l) = self.to_hsl();
        let mut hue = (h + degrees) % 360.0;
        if hue < 0.0 {
            hue += 360.0;
        }
        Self::from_hsl(hue, s, l)
    }

    /// Hue in degrees, saturation and lightness in percent, each rounded.
    fn to_hsl(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let mut h = if delta == 0.0 {
            0.0
        } else if r == max {
            (g - b) / delta
        } else if g == max {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };
        h = (h * 60.0).min(360.0);
        if h < 0.0 {
            h += 360.0;
        }

        let l = (min + max) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else if l <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };
        (h.round(), (s * 100.0).round(), (l * 100.0).round())
    }

    /// `h` in degrees (fractional allowed), `s` and `l` in percent.
    fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = h / 360.0;
        let s = s / 100.0;
        let l = l / 100.0;

        if s == 0.0 {
            let v = to_channel(l);
            return Self { r: v, g: v, b: v };
        }

        let t2 = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let t1 = 2.0 * l - t2;

        let component = |offset: f64| {
            let mut t3 = h + offset;
            if t3 < 0.0 {
                t3 += 1.0;
            }
            if t3 > 1.0 {
                t3 -= 1.0;
            }
            let v = if 6.0 * t3 < 1.0 {
                t1 + (t2 - t1) * 6.0 * t3
            } else if 2.0 * t3 < 1.0 {
                t2
            } else if 3.0 * t3 < 2.0 {
                t1 + (t2 - t1) * (2.0 / 3.0 - t3) * 6.0
            } else {
                t1
            };
            to_channel(v)
        };

        Self {
            r: component(1.0 / 3.0),
            g: component(0.0),
            b: component(-1.0 / 3.0),
        }
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
