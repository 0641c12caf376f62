/// Represents a color in RGBA format.
///
/// Each channel is an 8-bit unsigned integer. Widgets that work with hue,
/// saturation and value convert through [`Hsv`].
///
/// # Examples
///
/// ```
/// use tinct::Color;
///
/// let red = Color::rgb(255, 0, 0);
/// assert_eq!(red.normalize(), [1.0, 0.0, 0.0, 1.0]);
///
/// let semi_blue = Color::rgba(0, 0, 255, 128);
/// assert_eq!(semi_blue.to_array(), [0, 0, 255, 128]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color(pub [u8; 4]);

impl Color {
    /// A fully transparent color.
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);
    /// An opaque black color.
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    /// An opaque white color.
    pub const WHITE: Self = Self([255, 255, 255, 255]);

    /// Creates a new color with the specified RGB values and full opacity.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Creates a new color with the specified RGBA values.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Normalizes the color values to the range `[0.0, 1.0]`.
    pub fn normalize(&self) -> [f32; 4] {
        [
            self.0[0] as f32 / 255.0,
            self.0[1] as f32 / 255.0,
            self.0[2] as f32 / 255.0,
            self.0[3] as f32 / 255.0,
        ]
    }

    /// Returns the color as an array of 4 `u8` values.
    pub fn to_array(&self) -> [u8; 4] {
        self.0
    }

    /// Returns a copy of this color with the alpha channel replaced.
    pub fn with_alpha(&self, alpha: u8) -> Self {
        Self([self.0[0], self.0[1], self.0[2], alpha])
    }

    /// Creates an opaque color from normalized HSV coordinates.
    ///
    /// ```
    /// use tinct::{Color, Hsv};
    ///
    /// let cyan = Color::from_hsv(Hsv::new(0.5, 1.0, 1.0));
    /// assert_eq!(cyan, Color::rgb(0, 255, 255));
    /// ```
    pub fn from_hsv(hsv: Hsv) -> Self {
        let [r, g, b] = hsv.to_rgb();
        Self::rgb(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        )
    }

    /// Converts the color to normalized HSV coordinates. Alpha is dropped.
    pub fn to_hsv(&self) -> Hsv {
        let [r, g, b, _] = self.normalize();
        Hsv::from_rgb(r, g, b)
    }
}

impl From<Hsv> for Color {
    fn from(value: Hsv) -> Self {
        Color::from_hsv(value)
    }
}

/// Normalized HSV coordinates. All three components live in `[0.0, 1.0]`,
/// hue included: a hue of `1.0/6.0` is 60 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Converts to normalized RGB. A hue at or above 1.0 wraps into the last
    /// sector instead of indexing out of range.
    pub fn to_rgb(self) -> [f32; 3] {
        let c = self.s * self.v;
        let h6 = self.h * 6.0;
        let sector = (h6 as u32).min(5);
        let frac = h6 - sector as f32;

        // x = c * (1 - |h6 mod 2 - 1|), split per sector parity
        let x = if sector & 1 == 0 {
            c * frac
        } else {
            c * (1.0 - frac)
        };
        let m = self.v - c;

        let (r, g, b) = match sector {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [r + m, g + m, b + m]
    }

    /// Converts normalized RGB to HSV. Gray tones report a hue of zero.
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            ((g - b) / delta).rem_euclid(6.0) / 6.0
        } else if max == g {
            ((b - r) / delta + 2.0) / 6.0
        } else {
            ((r - g) / delta + 4.0) / 6.0
        };

        let s = if max == 0.0 { 0.0 } else { delta / max };

        Self { h, s, v: max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn primaries_convert_exactly() {
        assert_eq!(
            Color::from_hsv(Hsv::new(0.0, 1.0, 1.0)),
            Color::rgb(255, 0, 0)
        );
        assert_eq!(
            Color::from_hsv(Hsv::new(1.0 / 3.0, 1.0, 1.0)),
            Color::rgb(0, 255, 0)
        );
        assert_eq!(
            Color::from_hsv(Hsv::new(2.0 / 3.0, 1.0, 1.0)),
            Color::rgb(0, 0, 255)
        );
    }

    #[test]
    fn hue_wraps_at_one() {
        assert_eq!(
            Color::from_hsv(Hsv::new(1.0, 1.0, 1.0)),
            Color::rgb(255, 0, 0)
        );
    }

    #[test]
    fn black_and_white_have_zero_saturation() {
        let black = Color::BLACK.to_hsv();
        assert_close(black.s, 0.0);
        assert_close(black.v, 0.0);

        let white = Color::WHITE.to_hsv();
        assert_close(white.s, 0.0);
        assert_close(white.v, 1.0);
    }

    #[test]
    fn rgb_hsv_round_trip() {
        for color in [
            Color::rgb(255, 0, 0),
            Color::rgb(0, 255, 255),
            Color::rgb(64, 128, 255),
            Color::rgb(20, 20, 20),
            Color::rgb(200, 150, 17),
        ] {
            let back = Color::from_hsv(color.to_hsv());
            for (a, b) in back.to_array().iter().zip(color.to_array()) {
                assert!((*a as i16 - b as i16).abs() <= 1, "{back:?} != {color:?}");
            }
        }
    }

    #[test]
    fn hue_of_magenta_is_five_sixths() {
        assert_close(Color::rgb(255, 0, 255).to_hsv().h, 5.0 / 6.0);
    }
}
