use std::path::Path;

use clap::builder::PossibleValue;
use clap::ValueEnum;

pub mod batch;
pub mod progress;
pub mod surface;
pub mod task;

pub const DEFAULT_QUALITY: u8 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetFormat {
    Png,
    Jpeg,
    WebP,
    Bmp,
}

impl ValueEnum for TargetFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Png, Self::Jpeg, Self::WebP, Self::Bmp]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.extension()))
    }
}

impl TargetFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::WebP => "webp",
            Self::Bmp => "bmp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Bmp => "image/bmp",
        }
    }

    /// only lossy targets take a quality parameter
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::Jpeg)
    }

    pub(crate) fn image_format(&self) -> ::image::ImageFormat {
        match self {
            Self::Png => ::image::ImageFormat::Png,
            Self::Jpeg => ::image::ImageFormat::Jpeg,
            Self::WebP => ::image::ImageFormat::WebP,
            Self::Bmp => ::image::ImageFormat::Bmp,
        }
    }
}

/// Encoding quality in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    /// quality scaled to [0, 1]
    pub fn as_unit(&self) -> f32 {
        self.0 as f32 / 100_f32
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(DEFAULT_QUALITY)
    }
}

/// MIME type of a file if it looks like image data, judged by its extension
/// first and by its leading bytes second.
pub fn sniff_mime_type(file_name: &str, bytes: &[u8]) -> Option<&'static str> {
    Path::new(file_name)
        .extension()
        .and_then(|extension| extension.to_str())
        .and_then(::image::ImageFormat::from_extension)
        .or_else(|| ::image::guess_format(bytes).ok())
        .map(|format| format.to_mime_type())
}

/// `photo.final.png` becomes `photo`, matching how downloads are named.
pub fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

pub fn output_file_name(source_name: &str, format: TargetFormat) -> String {
    format!("{}.{}", base_name(source_name), format.extension())
}
