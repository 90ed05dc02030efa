use crate::assets::{AlphaData, ImageData, LogoAsset};
use crate::canvas::{Command, Document, Page};
use crate::debug::{DebugLogger, json_escape};
use crate::metrics::PageMetrics;
use crate::types::{Color, Pt, Size};
use fixed::types::I32F32;
use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub document_title: Option<String>,
    pub producer: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            document_title: None,
            producer: "chakra-report".to_string(),
        }
    }
}

/// What the serializer saw while writing, for metrics and warnings.
#[derive(Debug, Clone, Default)]
pub struct SerializeStats {
    pub pages: Vec<PageMetrics>,
    pub bytes_written: usize,
    /// Characters with no WinAnsi code that were left out of text runs.
    pub winansi_dropped: usize,
    /// Image resource ids drawn but not supplied.
    pub missing_images: Vec<String>,
}

const PDF_CATALOG_ID: usize = 1;
const PDF_PAGES_ID: usize = 2;
const PDF_RESOURCES_ID: usize = 3;

struct FontResource {
    resource: String,
    object_id: usize,
}

struct PdfStreamWriter<'a, W: Write> {
    writer: &'a mut W,
    offset: usize,
    offsets: Vec<usize>, // index by object id; 0 is the free object.
    next_id: usize,
    page_size: Size,
    options: &'a PdfOptions,
    debug: Option<&'a DebugLogger>,
    images: BTreeMap<&'a str, &'a ImageData>,

    fonts: BTreeMap<String, FontResource>,
    image_resources: BTreeMap<String, (String, usize)>,
    page_ids: Vec<usize>,
    stats: SerializeStats,
}

impl<'a, W: Write> PdfStreamWriter<'a, W> {
    fn new(
        writer: &'a mut W,
        page_size: Size,
        options: &'a PdfOptions,
        images: BTreeMap<&'a str, &'a ImageData>,
        debug: Option<&'a DebugLogger>,
    ) -> io::Result<Self> {
        let mut offset: usize = 0;
        write_bytes(writer, b"%PDF-1.7\n", &mut offset)?;
        write_bytes(writer, b"%\xE2\xE3\xCF\xD3\n", &mut offset)?;
        Ok(Self {
            writer,
            offset,
            offsets: vec![0; PDF_RESOURCES_ID + 1],
            next_id: PDF_RESOURCES_ID + 1,
            page_size,
            options,
            debug,
            images,
            fonts: BTreeMap::new(),
            image_resources: BTreeMap::new(),
            page_ids: Vec::new(),
            stats: SerializeStats::default(),
        })
    }

    fn add_page(&mut self, page: &Page) -> io::Result<()> {
        let start = self.alloc_ids(2);
        let content_id = start;
        let page_id = start + 1;

        let content_stream = self.render_page(page)?;
        self.stats.pages.push(PageMetrics {
            page_number: self.page_ids.len() + 1,
            kind: page.kind().unwrap_or_default().to_string(),
            command_count: page.commands.len(),
            content_bytes: content_stream.len(),
        });
        self.write_object(content_id, &stream_object(&content_stream))?;
        self.page_ids.push(page_id);

        let page_obj = format!(
            "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Resources {} 0 R /Contents {} 0 R >>",
            PDF_PAGES_ID,
            fmt_pt(self.page_size.width),
            fmt_pt(self.page_size.height),
            PDF_RESOURCES_ID,
            content_id,
        );
        self.write_object(page_id, &page_obj)
    }

    fn finish(mut self) -> io::Result<SerializeStats> {
        let fonts = std::mem::take(&mut self.fonts);
        for (name, font) in &fonts {
            self.write_object(font.object_id, &font_object(name))?;
        }

        let font_entries: Vec<(String, usize)> = fonts
            .values()
            .map(|f| (f.resource.clone(), f.object_id))
            .collect();
        let image_entries: Vec<(String, usize)> = self.image_resources.values().cloned().collect();
        let mut resources = format!("<< /Font {}", font_resources(&font_entries));
        if !image_entries.is_empty() {
            resources.push_str(&format!(" /XObject {}", xobject_resources(&image_entries)));
        }
        resources.push_str(" >>");
        self.write_object(PDF_RESOURCES_ID, &resources)?;

        let kids = self
            .page_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        let pages = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            self.page_ids.len()
        );
        self.write_object(PDF_PAGES_ID, &pages)?;

        let info_id = self.alloc_ids(1);
        let title = self.options.document_title.clone();
        self.write_object(
            info_id,
            &info_object(title.as_deref(), &self.options.producer),
        )?;

        let mut catalog = format!("<< /Type /Catalog /Pages {} 0 R", PDF_PAGES_ID);
        if title.is_some() {
            catalog.push_str(" /ViewerPreferences << /DisplayDocTitle true >>");
        }
        catalog.push_str(" >>");
        self.write_object(PDF_CATALOG_ID, &catalog)?;

        let total_objects = self.next_id.saturating_sub(1);
        let xref_start = self.offset;
        write_str(
            self.writer,
            &format!("xref\n0 {}\n", total_objects + 1),
            &mut self.offset,
        )?;
        write_bytes(self.writer, b"0000000000 65535 f \n", &mut self.offset)?;
        for id in 1..=total_objects {
            let obj_offset = self.offsets.get(id).copied().unwrap_or(0);
            write_str(
                self.writer,
                &format!("{:010} 00000 n \n", obj_offset),
                &mut self.offset,
            )?;
        }
        let trailer = format!(
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF",
            total_objects + 1,
            PDF_CATALOG_ID,
            info_id,
            xref_start
        );
        write_str(self.writer, &trailer, &mut self.offset)?;

        self.stats.bytes_written = self.offset;
        if let Some(logger) = self.debug {
            logger.log_json(&format!(
                "{{\"type\":\"pdf.link\",\"bytes\":{},\"pages\":{},\"fonts\":{},\"images\":{}}}",
                self.offset,
                self.page_ids.len(),
                fonts.len(),
                self.image_resources.len()
            ));
        }
        Ok(self.stats)
    }

    fn render_page(&mut self, page: &Page) -> io::Result<String> {
        let page_height = self.page_size.height;
        let mut out = String::new();
        let mut current_font_size = Pt::from_f32(12.0);
        let mut current_font_name = "Helvetica".to_string();

        for cmd in &page.commands {
            match cmd {
                Command::Meta { .. } => {}
                Command::SetFillColor(color) => out.push_str(&color_to_pdf_fill(*color)),
                Command::SetFontName(name) => current_font_name = name.clone(),
                Command::SetFontSize(size) => current_font_size = *size,
                Command::DrawRect {
                    x,
                    y,
                    width,
                    height,
                } => {
                    out.push_str(&format!(
                        "{} {} {} {} re f\n",
                        fmt_pt(*x),
                        fmt_pt(page_height - *y - *height),
                        fmt_pt(*width),
                        fmt_pt(*height)
                    ));
                }
                Command::DrawString { x, y, text } => {
                    let resource = self.ensure_font(&current_font_name);
                    let encoded = encode_winansi_pdf_string(text);
                    if encoded.dropped > 0 {
                        self.stats.winansi_dropped += encoded.dropped;
                        if let Some(logger) = self.debug {
                            logger.log_json(&format!(
                                "{{\"type\":\"pdf.winansi_dropped\",\"font\":\"{}\",\"dropped\":{},\"sample\":\"{}\"}}",
                                json_escape(&current_font_name),
                                encoded.dropped,
                                json_escape(&truncate_preview(text, 80))
                            ));
                            logger.increment("pdf.winansi_dropped", encoded.dropped as u64);
                        }
                    }
                    out.push_str("BT\n");
                    out.push_str(&format!("/{} {} Tf\n", resource, fmt_pt(current_font_size)));
                    out.push_str(&format!(
                        "{} {} Td\n",
                        fmt_pt(*x),
                        fmt_pt(page_height - *y - current_font_size)
                    ));
                    out.push_str(&format!("({}) Tj\n", encoded.text));
                    out.push_str("ET\n");
                }
                Command::DrawImage {
                    x,
                    y,
                    width,
                    height,
                    resource_id,
                } => {
                    let Some(name) = self.ensure_image(resource_id)? else {
                        continue;
                    };
                    out.push_str("q\n");
                    out.push_str(&format!(
                        "{} 0 0 {} {} {} cm\n",
                        fmt_pt(*width),
                        fmt_pt(*height),
                        fmt_pt(*x),
                        fmt_pt(page_height - *y - *height)
                    ));
                    out.push_str(&format!("/{} Do\n", name));
                    out.push_str("Q\n");
                }
            }
        }
        Ok(out)
    }

    fn ensure_font(&mut self, name: &str) -> String {
        if let Some(font) = self.fonts.get(name) {
            return font.resource.clone();
        }
        let resource = format!("F{}", self.fonts.len() + 1);
        let object_id = self.alloc_ids(1);
        self.fonts.insert(
            name.to_string(),
            FontResource {
                resource: resource.clone(),
                object_id,
            },
        );
        resource
    }

    fn ensure_image(&mut self, resource_id: &str) -> io::Result<Option<String>> {
        if let Some((name, _)) = self.image_resources.get(resource_id) {
            return Ok(Some(name.clone()));
        }
        let Some(image) = self.images.get(resource_id).copied() else {
            if !self.stats.missing_images.iter().any(|id| id == resource_id) {
                self.stats.missing_images.push(resource_id.to_string());
                if let Some(logger) = self.debug {
                    logger.log_json(&format!(
                        "{{\"type\":\"pdf.image.missing\",\"resource\":\"{}\"}}",
                        json_escape(resource_id)
                    ));
                }
            }
            return Ok(None);
        };

        let smask_id = image.alpha.as_ref().map(|_| self.alloc_ids(1));
        let obj_id = self.alloc_ids(1);
        let name = format!("Im{}", self.image_resources.len() + 1);
        if let (Some(alpha), Some(mask_id)) = (image.alpha.as_ref(), smask_id) {
            self.write_object(mask_id, &image_smask_object(alpha))?;
        }
        self.write_object(obj_id, &image_object(image, smask_id))?;
        self.image_resources
            .insert(resource_id.to_string(), (name.clone(), obj_id));
        Ok(Some(name))
    }

    fn alloc_ids(&mut self, count: usize) -> usize {
        let start = self.next_id;
        self.next_id = self.next_id.saturating_add(count);
        if self.offsets.len() < self.next_id {
            self.offsets.resize(self.next_id, 0);
        }
        start
    }

    fn write_object(&mut self, obj_id: usize, body: &str) -> io::Result<()> {
        write_pdf_object(
            self.writer,
            &mut self.offset,
            &mut self.offsets,
            obj_id,
            body,
        )
    }
}

pub fn document_to_pdf(document: &Document) -> io::Result<Vec<u8>> {
    let (bytes, _) = document_to_pdf_with_images(document, &[], &PdfOptions::default(), None)?;
    Ok(bytes)
}

/// Serializes `document`, resolving `DrawImage` resource ids against `images`.
/// Unknown ids are skipped and reported in the stats.
pub fn document_to_pdf_with_images(
    document: &Document,
    images: &[(&str, &LogoAsset)],
    options: &PdfOptions,
    debug: Option<&DebugLogger>,
) -> io::Result<(Vec<u8>, SerializeStats)> {
    let image_map: BTreeMap<&str, &ImageData> = images
        .iter()
        .map(|(id, asset)| (*id, &asset.image))
        .collect();
    let mut out = Vec::new();
    let mut writer = PdfStreamWriter::new(&mut out, document.page_size, options, image_map, debug)?;
    for page in &document.pages {
        writer.add_page(page)?;
    }
    let stats = writer.finish()?;
    Ok((out, stats))
}

fn image_object(image: &ImageData, smask_id: Option<usize>) -> String {
    let stream_data = encode_stream_data(&image.data);
    let filters = match image.filter {
        "/DCTDecode" => "[/ASCIIHexDecode /DCTDecode]",
        _ => "[/ASCIIHexDecode /FlateDecode]",
    };
    let smask = smask_id
        .map(|id| format!(" /SMask {} 0 R", id))
        .unwrap_or_default();
    format!(
        "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace {} /BitsPerComponent {} /Length {} /Filter {}{} >>\nstream\n{}\nendstream",
        image.width,
        image.height,
        image.color_space,
        image.bits_per_component,
        stream_data.len(),
        filters,
        smask,
        stream_data
    )
}

fn image_smask_object(alpha: &AlphaData) -> String {
    let stream_data = encode_stream_data(&alpha.data);
    format!(
        "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceGray /BitsPerComponent 8 /Length {} /Filter [/ASCIIHexDecode /FlateDecode] >>\nstream\n{}\nendstream",
        alpha.width,
        alpha.height,
        stream_data.len(),
        stream_data
    )
}

fn encode_stream_data(data: &[u8]) -> String {
    let mut hex = ascii_hex_encode(data);
    hex.push('>');
    hex
}

fn ascii_hex_encode(data: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

fn font_object(name: &str) -> String {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        sanitize_font_name(name)
    )
}

fn font_resources(fonts: &[(String, usize)]) -> String {
    let entries: Vec<String> = fonts
        .iter()
        .map(|(resource, font_id)| format!("/{} {} 0 R", resource, font_id))
        .collect();
    format!("<< {} >>", entries.join(" "))
}

fn xobject_resources(images: &[(String, usize)]) -> String {
    let entries: Vec<String> = images
        .iter()
        .map(|(resource, image_id)| format!("/{} {} 0 R", resource, image_id))
        .collect();
    format!("<< {} >>", entries.join(" "))
}

fn sanitize_font_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-')
        .collect();
    if cleaned.is_empty() {
        "Helvetica".to_string()
    } else {
        cleaned
    }
}

fn stream_object(content: &str) -> String {
    format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content)
}

fn info_object(title: Option<&str>, producer: &str) -> String {
    let mut entries: Vec<String> = Vec::new();
    if let Some(title) = title {
        entries.push(format!("/Title ({})", encode_winansi_pdf_string(title).text));
    }
    entries.push(format!(
        "/Producer ({})",
        encode_winansi_pdf_string(producer).text
    ));
    format!("<< {} >>", entries.join(" "))
}

fn write_pdf_object<W: Write>(
    writer: &mut W,
    offset: &mut usize,
    offsets: &mut [usize],
    obj_id: usize,
    body: &str,
) -> io::Result<()> {
    if let Some(slot) = offsets.get_mut(obj_id) {
        *slot = *offset;
    }
    write_str(writer, &format!("{} 0 obj\n", obj_id), offset)?;
    write_bytes(writer, body.as_bytes(), offset)?;
    write_bytes(writer, b"\nendobj\n", offset)?;
    Ok(())
}

fn write_bytes<W: Write>(writer: &mut W, data: &[u8], offset: &mut usize) -> io::Result<()> {
    writer.write_all(data)?;
    *offset += data.len();
    Ok(())
}

fn write_str<W: Write>(writer: &mut W, data: &str, offset: &mut usize) -> io::Result<()> {
    write_bytes(writer, data.as_bytes(), offset)
}

struct WinAnsiEncoded {
    /// Escaped PDF literal string body; bytes above 0x7E are octal escapes.
    text: String,
    dropped: usize,
}

fn winansi_byte(ch: char) -> Option<u8> {
    let byte = match ch {
        '\u{0000}'..='\u{007F}' => ch as u8,
        '\u{00A0}'..='\u{00FF}' => ch as u8,
        // cp1252 extensions
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

fn encode_winansi_pdf_string(input: &str) -> WinAnsiEncoded {
    let mut out = String::with_capacity(input.len());
    let mut dropped = 0usize;
    for ch in input.chars() {
        let Some(byte) = winansi_byte(ch) else {
            dropped += 1;
            continue;
        };
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b if b < 0x20 || b >= 0x7f => out.push_str(&format!("\\{:03o}", b)),
            b => out.push(b as char),
        }
    }
    WinAnsiEncoded { text: out, dropped }
}

fn truncate_preview(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }
    let mut out: String = input.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

fn fmt(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = I32F32::from_num(value);
    let scaled = (fixed * I32F32::from_num(1000)).round();
    let milli: i64 = scaled.to_num();
    format_milli(milli)
}

fn format_milli(milli: i64) -> String {
    if milli == 0 {
        return "0".to_string();
    }
    let sign = if milli < 0 { "-" } else { "" };
    let abs = milli.abs();
    let int_part = abs / 1000;
    let frac_part = abs % 1000;
    if frac_part == 0 {
        format!("{}{}", sign, int_part)
    } else {
        let mut s = format!("{}{}.{:03}", sign, int_part, frac_part);
        while s.ends_with('0') {
            s.pop();
        }
        s
    }
}

fn fmt_pt(value: Pt) -> String {
    format_milli(value.to_milli_i64())
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

fn color_to_pdf_fill(color: Color) -> String {
    format!(
        "{} {} {} rg\n",
        fmt(clamp_unit(color.r)),
        fmt(clamp_unit(color.g)),
        fmt(clamp_unit(color.b))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    fn one_page_document(commands: Vec<Command>) -> Document {
        Document {
            page_size: Size::a4(),
            pages: vec![Page { commands }],
        }
    }

    fn count_token(bytes: &[u8], token: &[u8]) -> usize {
        if token.is_empty() || bytes.len() < token.len() {
            return 0;
        }
        bytes.windows(token.len()).filter(|w| *w == token).count()
    }

    #[test]
    fn empty_document_is_a_valid_shell() {
        let bytes = document_to_pdf(&one_page_document(vec![])).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7\n"));
        assert!(bytes.ends_with(b"%%EOF"));
        assert_eq!(count_token(&bytes, b"/Type /Page "), 1);
        assert_eq!(count_token(&bytes, b"/Count 1"), 1);
    }

    #[test]
    fn fonts_are_declared_once_per_face() {
        let mut canvas = Canvas::new(Size::a4());
        for face in ["Helvetica", "Helvetica-Bold", "Helvetica"] {
            canvas.set_font_name(face);
            canvas.draw_string(Pt::ZERO, Pt::ZERO, "x");
        }
        canvas.show_page();
        canvas.set_font_name("Helvetica-Bold");
        canvas.draw_string(Pt::ZERO, Pt::ZERO, "y");
        let bytes = document_to_pdf(&canvas.finish()).unwrap();
        assert_eq!(count_token(&bytes, b"/BaseFont /Helvetica "), 1);
        assert_eq!(count_token(&bytes, b"/BaseFont /Helvetica-Bold "), 1);
        assert_eq!(count_token(&bytes, b"/Encoding /WinAnsiEncoding"), 2);
        assert_eq!(count_token(&bytes, b"/Type /Page "), 2);
    }

    #[test]
    fn rect_is_flipped_to_bottom_left_origin() {
        let doc = one_page_document(vec![
            Command::SetFillColor(Color::rgb8(255, 0, 0)),
            Command::DrawRect {
                x: Pt::from_f32(10.0),
                y: Pt::from_f32(20.0),
                width: Pt::from_f32(30.0),
                height: Pt::from_f32(40.0),
            },
        ]);
        let bytes = document_to_pdf(&doc).unwrap();
        let expected_y = Size::a4().height - Pt::from_f32(60.0);
        let token = format!("10 {} 30 40 re f", fmt_pt(expected_y));
        assert_eq!(count_token(&bytes, token.as_bytes()), 1);
        assert_eq!(count_token(&bytes, b"1 0 0 rg"), 1);
    }

    #[test]
    fn text_is_winansi_encoded_and_escaped() {
        let encoded = encode_winansi_pdf_string("caf\u{e9} (x) \\ \u{2019}");
        assert_eq!(encoded.text, "caf\\351 \\(x\\) \\\\ \\222");
        assert_eq!(encoded.dropped, 0);
    }

    #[test]
    fn unsupported_characters_are_dropped_and_counted() {
        let doc = one_page_document(vec![Command::DrawString {
            x: Pt::ZERO,
            y: Pt::ZERO,
            text: "ok \u{1F31F}\u{4E2D}".to_string(),
        }]);
        let (bytes, stats) =
            document_to_pdf_with_images(&doc, &[], &PdfOptions::default(), None).unwrap();
        assert_eq!(stats.winansi_dropped, 2);
        assert_eq!(count_token(&bytes, b"(ok ) Tj"), 1);
        assert_eq!(count_token(&bytes, b"?"), 0);
    }

    #[test]
    fn supplied_images_become_xobjects() {
        let logo =
            LogoAsset::from_bytes(&crate::assets::tests::png_bytes(2, 2, 100)).unwrap();
        let doc = one_page_document(vec![
            Command::DrawImage {
                x: Pt::ZERO,
                y: Pt::ZERO,
                width: Pt::from_f32(10.0),
                height: Pt::from_f32(10.0),
                resource_id: LogoAsset::RESOURCE_ID.to_string(),
            },
            Command::DrawImage {
                x: Pt::ZERO,
                y: Pt::ZERO,
                width: Pt::from_f32(10.0),
                height: Pt::from_f32(10.0),
                resource_id: "missing".to_string(),
            },
        ]);
        let (bytes, stats) = document_to_pdf_with_images(
            &doc,
            &[(LogoAsset::RESOURCE_ID, &logo)],
            &PdfOptions::default(),
            None,
        )
        .unwrap();
        assert_eq!(count_token(&bytes, b"/Subtype /Image"), 2);
        assert_eq!(count_token(&bytes, b"/SMask"), 1);
        assert_eq!(count_token(&bytes, b"/Im1 Do"), 1);
        assert_eq!(stats.missing_images, vec!["missing".to_string()]);
    }

    #[test]
    fn page_metrics_carry_kind_and_content_size() {
        let mut canvas = Canvas::new(Size::a4());
        canvas.meta(crate::canvas::META_PAGE_KIND_KEY, "cover");
        canvas.draw_string(Pt::ZERO, Pt::ZERO, "hello");
        let (_, stats) = document_to_pdf_with_images(
            &canvas.finish(),
            &[],
            &PdfOptions::default(),
            None,
        )
        .unwrap();
        assert_eq!(stats.pages.len(), 1);
        assert_eq!(stats.pages[0].kind, "cover");
        assert_eq!(stats.pages[0].page_number, 1);
        assert!(stats.pages[0].content_bytes > 0);
    }

    #[test]
    fn title_goes_into_the_info_dictionary() {
        let options = PdfOptions {
            document_title: Some("Asha (Report)".to_string()),
            ..PdfOptions::default()
        };
        let (bytes, _) =
            document_to_pdf_with_images(&one_page_document(vec![]), &[], &options, None).unwrap();
        assert_eq!(count_token(&bytes, b"/Title (Asha \\(Report\\))"), 1);
        assert_eq!(count_token(&bytes, b"/DisplayDocTitle true"), 1);
    }

    #[test]
    fn format_milli_trims_trailing_zeros() {
        assert_eq!(format_milli(0), "0");
        assert_eq!(format_milli(1500), "1.5");
        assert_eq!(format_milli(-250), "-0.25");
        assert_eq!(format_milli(12000), "12");
        assert_eq!(fmt(0.5), "0.5");
    }
}
