use crate::error::ReportError;
use crate::types::Pt;
use base64::Engine;
use image::GenericImageView;
use std::io::Write;
use std::path::Path;

/// Pixel data ready to be written as a PDF image XObject.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ImageData {
    pub width: u32,
    pub height: u32,
    pub color_space: &'static str,
    pub bits_per_component: u8,
    pub filter: &'static str,
    pub data: Vec<u8>,
    pub alpha: Option<AlphaData>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AlphaData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Branding image drawn in the cover header.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoAsset {
    source: String,
    pub(crate) image: ImageData,
}

impl LogoAsset {
    pub const RESOURCE_ID: &'static str = "logo";

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReportError> {
        Self::decode(bytes, None, "bytes")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes, None, &path.display().to_string())
    }

    /// Accepts `data:image/png;base64,...` style URIs.
    pub fn from_data_uri(uri: &str) -> Result<Self, ReportError> {
        let (mime, data) = parse_data_uri(uri)
            .ok_or_else(|| ReportError::Asset("malformed data URI".to_string()))?;
        Self::decode(&data, Some(&mime), "data-uri")
    }

    fn decode(bytes: &[u8], mime: Option<&str>, source: &str) -> Result<Self, ReportError> {
        let image = decode_image_bytes(bytes, mime)
            .ok_or_else(|| ReportError::Asset(format!("could not decode image from {source}")))?;
        Ok(Self {
            source: source.to_string(),
            image,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.image.width, self.image.height)
    }

    pub fn is_jpeg(&self) -> bool {
        self.image.filter == "/DCTDecode"
    }

    pub fn has_alpha(&self) -> bool {
        self.image.alpha.is_some()
    }

    /// Height that keeps the aspect ratio when drawn `width` wide.
    pub fn height_for_width(&self, width: Pt) -> Pt {
        if self.image.width == 0 {
            return Pt::ZERO;
        }
        let height = i32::try_from(self.image.height).unwrap_or(i32::MAX);
        let width_px = i32::try_from(self.image.width).unwrap_or(i32::MAX);
        width.mul_ratio(height, width_px)
    }
}

fn decode_image_bytes(data: &[u8], mime: Option<&str>) -> Option<ImageData> {
    let format = match mime {
        Some(mime) if mime.contains("png") => Some(image::ImageFormat::Png),
        Some(mime) if mime.contains("jpeg") || mime.contains("jpg") => Some(image::ImageFormat::Jpeg),
        _ => image::guess_format(data).ok(),
    };

    let decoded = image::load_from_memory(data).ok()?;
    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    if matches!(format, Some(image::ImageFormat::Jpeg)) {
        let color_space = match decoded.color() {
            image::ColorType::L8 | image::ColorType::La8 => "/DeviceGray",
            _ => "/DeviceRGB",
        };
        return Some(ImageData {
            width,
            height,
            color_space,
            bits_per_component: 8,
            filter: "/DCTDecode",
            data: data.to_vec(),
            alpha: None,
        });
    }

    let rgba = decoded.to_rgba8();
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    let mut has_alpha = false;
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        if a != 255 {
            has_alpha = true;
        }
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }

    let alpha = has_alpha.then(|| AlphaData {
        width,
        height,
        data: flate_compress(&alpha),
    });
    Some(ImageData {
        width,
        height,
        color_space: "/DeviceRGB",
        bits_per_component: 8,
        filter: "/FlateDecode",
        data: flate_compress(&rgb),
        alpha,
    })
}

pub(crate) fn parse_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, data_part) = rest.split_once(',')?;
    let mime = header
        .split(';')
        .next()
        .filter(|m| !m.is_empty())
        .unwrap_or("application/octet-stream")
        .to_string();
    let data = if header.contains("base64") {
        base64::engine::general_purpose::STANDARD
            .decode(data_part.trim())
            .ok()?
    } else {
        data_part.as_bytes().to_vec()
    };
    Some((mime, data))
}

pub(crate) fn flate_compress(data: &[u8]) -> Vec<u8> {
    use flate2::Compression;
    use flate2::write::ZlibEncoder;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    let _ = encoder.write_all(data);
    encoder.finish().unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;

    pub(crate) fn png_bytes(width: u32, height: u32, alpha: u8) -> Vec<u8> {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(width, height, Rgba([139, 92, 246, alpha]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn png_is_reencoded_as_flate_rgb() {
        let logo = LogoAsset::from_bytes(&png_bytes(4, 2, 255)).unwrap();
        assert_eq!(logo.pixel_size(), (4, 2));
        assert!(!logo.is_jpeg());
        assert!(!logo.has_alpha());
        assert_eq!(logo.height_for_width(Pt::from_mm(16.0)), Pt::from_mm(8.0));
    }

    #[test]
    fn translucent_png_keeps_an_alpha_mask() {
        let logo = LogoAsset::from_bytes(&png_bytes(2, 2, 128)).unwrap();
        assert!(logo.has_alpha());
    }

    #[test]
    fn data_uri_is_decoded() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes(3, 3, 255));
        let logo = LogoAsset::from_data_uri(&format!("data:image/png;base64,{encoded}")).unwrap();
        assert_eq!(logo.pixel_size(), (3, 3));
        assert_eq!(logo.source(), "data-uri");
    }

    #[test]
    fn garbage_bytes_are_an_asset_error() {
        let err = LogoAsset::from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, ReportError::Asset(_)));
        assert!(LogoAsset::from_data_uri("data:image/png;base64").is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = LogoAsset::from_path("/nonexistent/chakra_report/logo.png").unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
