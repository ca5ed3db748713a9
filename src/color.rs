use std::fmt::Display;

use crate::error::Error;

pub const PRESET_COLORS: &[&str] = &[
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9",
];

const HEX_DIGIT_COUNT: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RGBColorFormat<T> {
    red: T,
    green: T,
    blue: T,
}

impl<T: Copy> RGBColorFormat<T> {
    pub fn new(red: T, green: T, blue: T) -> Self {
        Self { red, green, blue }
    }

    pub fn red(&self) -> T {
        self.red
    }

    pub fn green(&self) -> T {
        self.green
    }

    pub fn blue(&self) -> T {
        self.blue
    }
}

impl From<&RGBColorFormat<u8>> for RGBColorFormat<f64> {
    fn from(value: &RGBColorFormat<u8>) -> Self {
        RGBColorFormat {
            red: value.red as f64 / 255_f64,
            green: value.green as f64 / 255_f64,
            blue: value.blue as f64 / 255_f64,
        }
    }
}

impl Display for RGBColorFormat<u8> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// hue in degrees [0, 360), saturation and lightness in percent [0, 100]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HSLColorFormat {
    hue: u16,
    saturation: u8,
    lightness: u8,
}

impl HSLColorFormat {
    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn saturation(&self) -> u8 {
        self.saturation
    }

    pub fn lightness(&self) -> u8 {
        self.lightness
    }
}

impl From<&RGBColorFormat<u8>> for HSLColorFormat {
    fn from(value: &RGBColorFormat<u8>) -> Self {
        let RGBColorFormat { red, green, blue } = RGBColorFormat::<f64>::from(value);
        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let lightness = (max + min) / 2_f64;

        let (hue, saturation) = if max == min {
            (0_f64, 0_f64)
        } else {
            let delta = max - min;
            let saturation = if lightness > 0.5 {
                delta / (2_f64 - max - min)
            } else {
                delta / (max + min)
            };
            let sector = if max == red {
                ((green - blue) / delta).rem_euclid(6_f64)
            } else if max == green {
                (blue - red) / delta + 2_f64
            } else {
                (red - green) / delta + 4_f64
            };
            (sector * 60_f64, saturation)
        };

        HSLColorFormat {
            // a hue just below 360 rounds up onto 0
            hue: (hue.round() as u16) % 360,
            saturation: (saturation * 100_f64).round() as u8,
            lightness: (lightness * 100_f64).round() as u8,
        }
    }
}

impl Display for HSLColorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorValue {
    hex: String,
    rgb: RGBColorFormat<u8>,
    hsl: HSLColorFormat,
}

impl ColorValue {
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> RGBColorFormat<u8> {
        self.rgb
    }

    pub fn hsl(&self) -> HSLColorFormat {
        self.hsl
    }
}

/// Parses `#RRGGBB` (the `#` is optional) into its RGB and HSL representations.
pub fn convert(input: &str) -> crate::Result<ColorValue> {
    let normalized = if input.starts_with('#') {
        input.to_owned()
    } else {
        format!("#{}", input)
    };
    let digits = &normalized[1..];
    if digits.len() != HEX_DIGIT_COUNT || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(Error::InvalidColorFormat(input.to_owned()));
    }
    let rgb = RGBColorFormat {
        red: parse_channel(digits, 0, input)?,
        green: parse_channel(digits, 2, input)?,
        blue: parse_channel(digits, 4, input)?,
    };
    let hsl = HSLColorFormat::from(&rgb);
    Ok(ColorValue {
        hex: normalized.to_ascii_uppercase(),
        rgb,
        hsl,
    })
}

fn parse_channel(digits: &str, offset: usize, input: &str) -> crate::Result<u8> {
    u8::from_str_radix(&digits[offset..offset + 2], 16)
        .map_err(|_| Error::InvalidColorFormat(input.to_owned()))
}

#[cfg(test)]
mod test {
    use super::{convert, HSLColorFormat, RGBColorFormat, PRESET_COLORS};
    use crate::error::Error;

    fn hsl_triple(input: &str) -> (u16, u8, u8) {
        let hsl = convert(input).expect("valid color").hsl();
        (hsl.hue(), hsl.saturation(), hsl.lightness())
    }

    #[test]
    fn convert_black_white_and_red() {
        assert_eq!(hsl_triple("#000000"), (0, 0, 0));
        assert_eq!(hsl_triple("#FFFFFF"), (0, 0, 100));
        assert_eq!(hsl_triple("#FF0000"), (0, 100, 50));
    }

    #[test]
    fn convert_green_and_blue_sectors() {
        assert_eq!(hsl_triple("#00FF00"), (120, 100, 50));
        assert_eq!(hsl_triple("#0000FF"), (240, 100, 50));
        assert_eq!(hsl_triple("#FF00FF"), (300, 100, 50));
    }

    #[test]
    fn convert_reproduces_channel_values() {
        let color = convert("#3b82f6").expect("valid color");
        assert_eq!(color.rgb(), RGBColorFormat::new(0x3b, 0x82, 0xf6));
        assert_eq!(color.hex(), "#3B82F6");
    }

    #[test]
    fn convert_without_hash_is_identical() {
        let without_hash = convert("3b82f6").expect("valid color");
        let with_hash = convert("#3B82F6").expect("valid color");
        assert_eq!(without_hash, with_hash);
    }

    #[test]
    fn render_css_strings() {
        let color = convert("#3B82F6").expect("valid color");
        assert_eq!(color.rgb().to_string(), "rgb(59, 130, 246)");
        assert_eq!(color.hsl().to_string(), "hsl(217, 91%, 60%)");
    }

    #[test]
    fn hue_close_to_full_turn_wraps_to_zero() {
        // (0 - 1/255) / 1 mod 6 * 60 = 359.76
        assert_eq!(hsl_triple("#FF0001").0, 0);
    }

    #[test]
    fn lightness_above_half_uses_upper_saturation_formula() {
        // max 1.0, min 0.6 -> l = 0.8, s = 0.4 / (2 - 1.6) = 1.0
        let rgb = RGBColorFormat::new(255, 153, 153);
        let hsl = HSLColorFormat::from(&rgb);
        assert_eq!(hsl.lightness(), 80);
        assert_eq!(hsl.saturation(), 100);
        assert_eq!(hsl.hue(), 0);
    }

    #[test]
    fn reject_malformed_input() {
        for input in ["not-a-color", "#ABC", "#GGGGGG", "#3B82F6FF", "", "#", "#3B82F"] {
            match convert(input) {
                Err(Error::InvalidColorFormat(rejected)) => assert_eq!(rejected, input),
                other => panic!("'{}' was not rejected, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn reject_multibyte_characters_without_panicking() {
        assert!(convert("#ÄÄÄ").is_err());
        assert!(convert("ééé").is_err());
    }

    #[test]
    fn all_grey_levels_have_zero_saturation() {
        for level in 0..=255_u8 {
            let hsl = HSLColorFormat::from(&RGBColorFormat::new(level, level, level));
            assert_eq!(hsl.hue(), 0);
            assert_eq!(hsl.saturation(), 0);
            assert!(hsl.lightness() <= 100);
        }
    }

    #[test]
    fn presets_are_valid_colors() {
        for preset in PRESET_COLORS {
            let color = convert(preset).expect("preset must be valid");
            assert_eq!(color.hex(), *preset);
        }
    }
}
