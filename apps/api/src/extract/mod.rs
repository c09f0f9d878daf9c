//! Document normalization: resume file bytes in, clean extracted text out.
//!
//! Dispatch is a closed enumeration over file extensions. Every extractor
//! produces one string from per-unit fragments (PDF pages, DOCX paragraphs)
//! joined by a blank line, then trimmed. Callers are expected to enforce the
//! upload size gate before calling [`normalize`].

use thiserror::Error;

/// Minimum number of characters a resume must contain after extraction.
/// Anything shorter is almost certainly a scan, a blank page, or junk.
pub const MIN_TEXT_CHARS: usize = 50;

/// Upload size gate, enforced by the HTTP handler before normalization.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Human-readable list for error messages.
pub const SUPPORTED_FORMATS: &str = ".pdf, .docx, .doc, .txt";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: '{extension}'. Supported formats: {SUPPORTED_FORMATS}")]
    UnsupportedFormat { extension: String },

    #[error("Failed to parse {format} file: {cause}")]
    ParseFailure {
        format: &'static str,
        cause: String,
    },

    #[error(
        "Resume appears to be empty or too short ({chars} characters, minimum {MIN_TEXT_CHARS}). \
         Please ensure the file contains valid text content."
    )]
    TooShort { chars: usize },
}

/// The closed set of resume formats this service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    PlainText,
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Dispatches on the filename's extension suffix, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();

        match extension.as_str() {
            ".txt" => Ok(ResumeFormat::PlainText),
            ".pdf" => Ok(ResumeFormat::Pdf),
            ".docx" | ".doc" => Ok(ResumeFormat::Docx),
            _ => Err(ExtractError::UnsupportedFormat { extension }),
        }
    }
}

/// Converts an uploaded resume file into trimmed plain text.
///
/// Deterministic for a given bytes+filename pair. Fails with a typed error on
/// unknown extensions, unparseable containers, or near-empty output.
pub fn normalize(file_bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    let format = ResumeFormat::from_filename(filename)?;

    let text = match format {
        ResumeFormat::PlainText => extract_txt(file_bytes),
        ResumeFormat::Pdf => extract_pdf(file_bytes)?,
        ResumeFormat::Docx => extract_docx(file_bytes)?,
    };

    let text = text.trim().to_string();
    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(ExtractError::TooShort { chars });
    }

    Ok(text)
}

/// Decodes a text file as UTF-8, falling back to Latin-1 on invalid bytes.
/// Latin-1 maps every byte to a char, so this never fails.
fn extract_txt(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract already separates pages with blank lines in its output.
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::ParseFailure {
        format: "PDF",
        cause: e.to_string(),
    })
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::ParseFailure {
        format: "DOCX",
        cause: e.to_string(),
    })?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(p) => {
                let text = p.raw_text();
                (!text.trim().is_empty()).then_some(text)
            }
            _ => None,
        })
        .collect();

    Ok(join_fragments(&paragraphs))
}

/// Joins per-unit text fragments (pages, paragraphs) with a blank line.
fn join_fragments(fragments: &[String]) -> String {
    fragments.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_text() -> String {
        "Senior backend engineer with eight years of experience building \
         distributed systems in Rust and Go."
            .to_string()
    }

    #[test]
    fn test_dispatch_txt() {
        assert_eq!(
            ResumeFormat::from_filename("resume.txt").unwrap(),
            ResumeFormat::PlainText
        );
    }

    #[test]
    fn test_dispatch_is_case_insensitive() {
        assert_eq!(
            ResumeFormat::from_filename("Resume.PDF").unwrap(),
            ResumeFormat::Pdf
        );
        assert_eq!(
            ResumeFormat::from_filename("cv.DocX").unwrap(),
            ResumeFormat::Docx
        );
    }

    #[test]
    fn test_dispatch_doc_maps_to_docx() {
        assert_eq!(
            ResumeFormat::from_filename("old.doc").unwrap(),
            ResumeFormat::Docx
        );
    }

    #[test]
    fn test_dispatch_unknown_extension() {
        let err = ResumeFormat::from_filename("resume.png").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(".png"));
        assert!(msg.contains(".pdf"));
        assert!(msg.contains(".txt"));
    }

    #[test]
    fn test_dispatch_no_extension() {
        assert!(ResumeFormat::from_filename("resume").is_err());
    }

    #[test]
    fn test_normalize_txt_utf8() {
        let text = long_text();
        let out = normalize(text.as_bytes(), "resume.txt").unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let padded = format!("\n\n  {}  \n", long_text());
        let out = normalize(padded.as_bytes(), "resume.txt").unwrap();
        assert_eq!(out, long_text());
    }

    #[test]
    fn test_normalize_txt_latin1_fallback() {
        // 0xE9 is 'é' in Latin-1 but invalid as a standalone UTF-8 byte.
        let mut bytes = long_text().into_bytes();
        bytes.push(b' ');
        bytes.push(0xE9);
        let out = normalize(&bytes, "resume.txt").unwrap();
        assert!(out.ends_with('é'));
    }

    #[test]
    fn test_normalize_rejects_short_text() {
        let err = normalize(b"too short", "resume.txt").unwrap_err();
        assert!(matches!(err, ExtractError::TooShort { chars: 9 }));
    }

    #[test]
    fn test_normalize_rejects_whitespace_only() {
        let err = normalize(b"   \n\n   ", "resume.txt").unwrap_err();
        assert!(matches!(err, ExtractError::TooShort { chars: 0 }));
    }

    #[test]
    fn test_normalize_corrupt_pdf_is_parse_failure() {
        let err = normalize(b"definitely not a pdf", "resume.pdf").unwrap_err();
        assert!(matches!(err, ExtractError::ParseFailure { format: "PDF", .. }));
    }

    #[test]
    fn test_normalize_corrupt_docx_is_parse_failure() {
        let err = normalize(b"definitely not a docx", "resume.docx").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::ParseFailure { format: "DOCX", .. }
        ));
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let text = long_text();
        let a = normalize(text.as_bytes(), "resume.txt").unwrap();
        let b = normalize(text.as_bytes(), "resume.txt").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_join_fragments_blank_line_delimiter() {
        let fragments = vec!["page one".to_string(), "page two".to_string()];
        assert_eq!(join_fragments(&fragments), "page one\n\npage two");
    }

    #[test]
    fn test_join_fragments_empty() {
        assert_eq!(join_fragments(&[]), "");
    }
}
