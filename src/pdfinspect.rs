use lopdf::Document as LoDocument;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfInspectErrorCode {
    PdfParseFailed,
    PdfEncryptedUnsupported,
    PdfTooFewPages,
    PdfIoError,
}

impl PdfInspectErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfInspectErrorCode::PdfParseFailed => "PDF_PARSE_FAILED",
            PdfInspectErrorCode::PdfEncryptedUnsupported => "PDF_ENCRYPTED_UNSUPPORTED",
            PdfInspectErrorCode::PdfTooFewPages => "PDF_TOO_FEW_PAGES",
            PdfInspectErrorCode::PdfIoError => "PDF_IO_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfInspectError {
    pub code: PdfInspectErrorCode,
    pub message: String,
}

impl std::fmt::Display for PdfInspectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for PdfInspectError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfInspectReport {
    pub pdf_version: String,
    pub page_count: usize,
    pub encrypted: bool,
    pub file_size_bytes: usize,
    pub title: Option<String>,
}

pub fn inspect_pdf_bytes(bytes: &[u8]) -> Result<PdfInspectReport, PdfInspectError> {
    let pdf = load(bytes)?;
    Ok(PdfInspectReport {
        pdf_version: pdf.version.clone(),
        page_count: pdf.get_pages().len(),
        encrypted: pdf.is_encrypted(),
        file_size_bytes: bytes.len(),
        title: info_title(&pdf),
    })
}

pub fn inspect_pdf_path(path: &Path) -> Result<PdfInspectReport, PdfInspectError> {
    let data = std::fs::read(path).map_err(|err| PdfInspectError {
        code: PdfInspectErrorCode::PdfIoError,
        message: err.to_string(),
    })?;
    inspect_pdf_bytes(&data)
}

/// Text drawn on one page (1-based), as lopdf extracts it.
pub fn page_text(bytes: &[u8], page_number: u32) -> Result<String, PdfInspectError> {
    let pdf = load(bytes)?;
    pdf.extract_text(&[page_number])
        .map_err(|err| PdfInspectError {
            code: PdfInspectErrorCode::PdfParseFailed,
            message: err.to_string(),
        })
}

/// A rendered report has at least its fixed pages and is never encrypted.
pub fn require_report_shape(
    report: &PdfInspectReport,
    min_pages: usize,
) -> Result<(), PdfInspectError> {
    if report.encrypted {
        return Err(PdfInspectError {
            code: PdfInspectErrorCode::PdfEncryptedUnsupported,
            message: "encrypted pdf output is not expected".to_string(),
        });
    }
    if report.page_count < min_pages {
        return Err(PdfInspectError {
            code: PdfInspectErrorCode::PdfTooFewPages,
            message: format!(
                "expected at least {} pages, found {}",
                min_pages, report.page_count
            ),
        });
    }
    Ok(())
}

fn load(bytes: &[u8]) -> Result<LoDocument, PdfInspectError> {
    LoDocument::load_mem(bytes).map_err(|err| PdfInspectError {
        code: PdfInspectErrorCode::PdfParseFailed,
        message: err.to_string(),
    })
}

fn info_title(pdf: &LoDocument) -> Option<String> {
    let info_id = pdf.trailer.get(b"Info").ok()?.as_reference().ok()?;
    let info = pdf.get_dictionary(info_id).ok()?;
    let raw = info.get(b"Title").ok()?.as_str().ok()?;
    Some(raw.iter().map(|b| *b as char).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::pdf::{PdfOptions, document_to_pdf, document_to_pdf_with_images};
    use crate::types::{Pt, Size};
    use std::io::Write;

    fn two_page_pdf() -> Vec<u8> {
        let mut canvas = Canvas::new(Size::a4());
        canvas.draw_string(Pt::from_f32(72.0), Pt::from_f32(72.0), "HELLO");
        canvas.show_page();
        canvas.draw_string(Pt::from_f32(72.0), Pt::from_f32(72.0), "WORLD");
        document_to_pdf(&canvas.finish()).unwrap()
    }

    #[test]
    fn generated_output_parses_with_version_and_page_count() {
        let bytes = two_page_pdf();
        let report = inspect_pdf_bytes(&bytes).expect("inspect");
        assert_eq!(report.page_count, 2);
        assert_eq!(report.pdf_version, "1.7");
        assert!(!report.encrypted);
        assert_eq!(report.file_size_bytes, bytes.len());
        assert!(require_report_shape(&report, 2).is_ok());
    }

    #[test]
    fn page_text_reads_back_drawn_strings() {
        let bytes = two_page_pdf();
        assert!(page_text(&bytes, 1).unwrap().contains("HELLO"));
        assert!(page_text(&bytes, 2).unwrap().contains("WORLD"));
    }

    #[test]
    fn title_is_read_from_info() {
        let mut canvas = Canvas::new(Size::a4());
        canvas.draw_string(Pt::ZERO, Pt::ZERO, "x");
        let options = PdfOptions {
            document_title: Some("Asha Chakra Report".to_string()),
            ..PdfOptions::default()
        };
        let (bytes, _) =
            document_to_pdf_with_images(&canvas.finish(), &[], &options, None).unwrap();
        let report = inspect_pdf_bytes(&bytes).unwrap();
        assert_eq!(report.title.as_deref(), Some("Asha Chakra Report"));
    }

    #[test]
    fn inspect_pdf_bytes_rejects_malformed_data() {
        let err = inspect_pdf_bytes(b"not a pdf").expect_err("invalid");
        assert_eq!(err.code, PdfInspectErrorCode::PdfParseFailed);
    }

    #[test]
    fn inspect_pdf_path_reports_io_error_for_missing_file() {
        let missing = std::env::temp_dir().join(format!(
            "chakra_report_missing_{}.pdf",
            std::process::id()
        ));
        let err = inspect_pdf_path(&missing).expect_err("missing");
        assert_eq!(err.code, PdfInspectErrorCode::PdfIoError);
    }

    #[test]
    fn too_few_pages_is_rejected() {
        let report = PdfInspectReport {
            pdf_version: "1.7".to_string(),
            page_count: 3,
            encrypted: false,
            file_size_bytes: 0,
            title: None,
        };
        let err = require_report_shape(&report, 4).expect_err("must fail");
        assert_eq!(err.code, PdfInspectErrorCode::PdfTooFewPages);

        let encrypted = PdfInspectReport {
            encrypted: true,
            page_count: 5,
            ..report
        };
        let err = require_report_shape(&encrypted, 4).expect_err("must fail");
        assert_eq!(err.code, PdfInspectErrorCode::PdfEncryptedUnsupported);
    }

    #[test]
    fn inspect_pdf_path_matches_bytes_report() {
        let bytes = two_page_pdf();
        let path = std::env::temp_dir().join(format!(
            "chakra_report_inspect_{}_{}.pdf",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ));
        let mut f = std::fs::File::create(&path).expect("create");
        f.write_all(&bytes).expect("write");
        drop(f);

        let from_path = inspect_pdf_path(&path).expect("inspect path");
        let _ = std::fs::remove_file(&path);
        assert_eq!(from_path, inspect_pdf_bytes(&bytes).expect("inspect bytes"));
    }
}
