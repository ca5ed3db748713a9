use std::io::Cursor;

use ::image::codecs::jpeg::JpegEncoder;
use ::image::DynamicImage;

use super::{Quality, TargetFormat};
use crate::error::Error;

/// Scratch raster used to re-encode one image at a time.
///
/// Decoding replaces whatever the surface held before, encoding reads the
/// current raster. Implementations are not expected to be reentrant.
pub trait RasterSurface {
    /// returns the natural dimensions of the decoded image
    fn decode(&mut self, bytes: &[u8]) -> crate::Result<(u32, u32)>;

    fn encode(&self, format: TargetFormat, quality: Option<Quality>) -> crate::Result<Vec<u8>>;
}

/// RGBA8 raster backed by the `image` crate codecs.
#[derive(Default)]
pub struct CanvasSurface {
    raster: Option<DynamicImage>,
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode_jpeg(raster: &DynamicImage, quality: Quality) -> crate::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        // the encoder accepts 1..=100
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.percent().max(1));
        encoder
            .encode_image(&raster.to_rgb8())
            .map_err(|e| Error::UnableToEncodeImage(e.to_string()))?;
        Ok(buffer)
    }

    fn encode_lossless(raster: &DynamicImage, format: TargetFormat) -> crate::Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        raster
            .write_to(&mut buffer, format.image_format())
            .map_err(|e| Error::UnableToEncodeImage(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

impl RasterSurface for CanvasSurface {
    fn decode(&mut self, bytes: &[u8]) -> crate::Result<(u32, u32)> {
        self.raster = None;
        let image = ::image::load_from_memory(bytes)
            .map_err(|e| Error::UnableToDecodeImage(e.to_string()))?;
        let dimensions = (image.width(), image.height());
        self.raster = Some(DynamicImage::ImageRgba8(image.to_rgba8()));
        Ok(dimensions)
    }

    fn encode(&self, format: TargetFormat, quality: Option<Quality>) -> crate::Result<Vec<u8>> {
        let raster = self.raster.as_ref().ok_or(Error::NoImageOnSurface)?;
        let bytes = match format {
            TargetFormat::Jpeg => Self::encode_jpeg(raster, quality.unwrap_or_default())?,
            _ => Self::encode_lossless(raster, format)?,
        };
        if bytes.is_empty() {
            return Err(Error::EmptyEncoderOutput);
        }
        Ok(bytes)
    }
}

#[cfg(test)]
pub(crate) fn sample_image_bytes(width: u32, height: u32, format: ::image::ImageFormat) -> Vec<u8> {
    let image = ::image::RgbImage::from_fn(width, height, |x, y| {
        ::image::Rgb([(x * 37 % 256) as u8, (y * 91 % 256) as u8, ((x ^ y) % 256) as u8])
    });
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buffer, format)
        .expect("encoding of sample image failed");
    buffer.into_inner()
}

#[cfg(test)]
mod test {
    use super::{sample_image_bytes, CanvasSurface, RasterSurface};
    use crate::error::Error;
    use crate::image::{Quality, TargetFormat};

    #[test]
    fn decode_reports_natural_dimensions() {
        let mut surface = CanvasSurface::new();
        let bytes = sample_image_bytes(13, 7, ::image::ImageFormat::Png);
        assert_eq!(surface.decode(&bytes).expect("decode"), (13, 7));
    }

    #[test]
    fn encode_to_every_target_format() {
        let mut surface = CanvasSurface::new();
        surface
            .decode(&sample_image_bytes(16, 16, ::image::ImageFormat::Bmp))
            .expect("decode");
        for format in [
            TargetFormat::Png,
            TargetFormat::Jpeg,
            TargetFormat::WebP,
            TargetFormat::Bmp,
        ] {
            let bytes = surface.encode(format, None).expect("encode");
            let guessed = ::image::guess_format(&bytes).expect("known signature");
            assert_eq!(guessed, format.image_format());
            let reloaded = ::image::load_from_memory(&bytes).expect("reload");
            assert_eq!((reloaded.width(), reloaded.height()), (16, 16));
        }
    }

    #[test]
    fn jpeg_quality_changes_output_size() {
        let mut surface = CanvasSurface::new();
        surface
            .decode(&sample_image_bytes(64, 64, ::image::ImageFormat::Png))
            .expect("decode");
        let low = surface
            .encode(TargetFormat::Jpeg, Some(Quality::new(5)))
            .expect("encode");
        let high = surface
            .encode(TargetFormat::Jpeg, Some(Quality::new(100)))
            .expect("encode");
        assert!(low.len() < high.len(), "{} >= {}", low.len(), high.len());
    }

    #[test]
    fn zero_quality_still_encodes() {
        let mut surface = CanvasSurface::new();
        surface
            .decode(&sample_image_bytes(8, 8, ::image::ImageFormat::Png))
            .expect("decode");
        assert!(surface
            .encode(TargetFormat::Jpeg, Some(Quality::new(0)))
            .is_ok());
    }

    #[test]
    fn decode_garbage_fails_and_clears_raster() {
        let mut surface = CanvasSurface::new();
        surface
            .decode(&sample_image_bytes(4, 4, ::image::ImageFormat::Png))
            .expect("decode");
        let result = surface.decode(b"definitely not an image");
        assert!(matches!(result, Err(Error::UnableToDecodeImage(_))));
        assert!(matches!(
            surface.encode(TargetFormat::Png, None),
            Err(Error::NoImageOnSurface)
        ));
    }

    #[test]
    fn encode_before_decode_fails() {
        let surface = CanvasSurface::new();
        assert!(matches!(
            surface.encode(TargetFormat::Bmp, None),
            Err(Error::NoImageOnSurface)
        ));
    }
}
