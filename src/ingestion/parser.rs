//! PDF and spreadsheet parsing into page/sheet segments

use std::path::Path;

use calamine::Reader;

use crate::error::{Error, Result};
use crate::types::{PageContent, ParsedDocument, SupportedKind};

/// Multi-format file parser
pub struct FileParser;

impl FileParser {
    /// Load a file into per-page (or per-sheet) text segments.
    ///
    /// The declared MIME type is checked before the file is touched; only
    /// PDF and XLSX are accepted.
    pub fn load(path: &Path, declared_mime: &str) -> Result<ParsedDocument> {
        let kind = SupportedKind::from_mime(declared_mime)
            .ok_or_else(|| Error::UnsupportedFileType(declared_mime.to_string()))?;

        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let parsed = match kind {
            SupportedKind::Pdf => Self::parse_pdf(&filename, &data)?,
            SupportedKind::Spreadsheet => Self::parse_xlsx(&filename, &data)?,
        };

        if parsed.pages.is_empty() {
            return Err(Error::EmptyDocument(format!(
                "No text content could be extracted from '{}'",
                filename
            )));
        }

        Ok(parsed)
    }

    /// Parse a PDF into per-page text
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let page_texts = match pdf_extract::extract_text_from_mem_by_pages(data) {
            Ok(texts) => texts,
            Err(e) => {
                tracing::warn!("pdf-extract failed for '{}': {}, trying fallback", filename, e);
                Self::extract_pdf_pages_fallback(filename, data)?
            }
        };

        let pages = page_texts
            .into_iter()
            .enumerate()
            .filter_map(|(i, text)| {
                let content = Self::tidy_text(&text);
                if content.is_empty() {
                    None
                } else {
                    Some(PageContent {
                        page_number: Some(i as u32 + 1),
                        content,
                    })
                }
            })
            .collect();

        Ok(ParsedDocument {
            kind: SupportedKind::Pdf,
            pages,
        })
    }

    /// Fallback PDF text extraction using lopdf content streams directly
    fn extract_pdf_pages_fallback(filename: &str, data: &[u8]) -> Result<Vec<String>> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::file_parse(filename, format!("Failed to load PDF: {}", e)))?;

        let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        page_numbers.sort_unstable();

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            match doc.extract_text(&[page_number]) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    tracing::debug!("No text on page {} of '{}': {}", page_number, filename, e);
                    pages.push(String::new());
                }
            }
        }

        if pages.iter().all(|p| p.trim().is_empty()) {
            return Err(Error::file_parse(
                filename,
                "PDF appears to be image-based or has no extractable text",
            ));
        }

        Ok(pages)
    }

    /// Parse an XLSX workbook, one segment per sheet
    fn parse_xlsx(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let cursor = std::io::Cursor::new(data);
        let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let mut pages = Vec::new();
        let mut sheet_number = 0u32;

        for sheet_name in workbook.sheet_names().to_vec() {
            sheet_number += 1;

            let Ok(range) = workbook.worksheet_range(&sheet_name) else {
                continue;
            };

            let mut sheet_content = format!("Sheet: {}\n", sheet_name);
            let mut has_cells = false;

            for row in range.rows() {
                let row_text: Vec<String> = row
                    .iter()
                    .map(|cell| match cell {
                        calamine::Data::Empty => String::new(),
                        calamine::Data::String(s) => s.clone(),
                        calamine::Data::Float(f) => f.to_string(),
                        calamine::Data::Int(i) => i.to_string(),
                        calamine::Data::Bool(b) => b.to_string(),
                        calamine::Data::DateTime(dt) => dt.to_string(),
                        _ => String::new(),
                    })
                    .collect();

                if row_text.iter().any(|c| !c.is_empty()) {
                    has_cells = true;
                    sheet_content.push_str(&row_text.join("\t"));
                    sheet_content.push('\n');
                }
            }

            if has_cells {
                pages.push(PageContent {
                    page_number: Some(sheet_number),
                    content: sheet_content,
                });
            }
        }

        Ok(ParsedDocument {
            kind: SupportedKind::Spreadsheet,
            pages,
        })
    }

    /// Strip null bytes and collapse blank lines from extracted text
    fn tidy_text(text: &str) -> String {
        text.replace('\0', "")
            .lines()
            .map(|l| l.trim_end())
            .filter(|l| !l.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_mime_before_reading_the_file() {
        // The path does not exist; an IO error here would mean the MIME
        // check ran after the read.
        let err = FileParser::load(Path::new("/nonexistent/report.docx"), "application/msword")
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }

    #[test]
    fn missing_file_with_supported_mime_is_an_io_error() {
        let err =
            FileParser::load(Path::new("/nonexistent/report.pdf"), "application/pdf").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn tidy_text_drops_blank_lines_and_nulls() {
        let tidied = FileParser::tidy_text("a\0b\n   \n\nsecond line  \n");
        assert_eq!(tidied, "ab\nsecond line");
    }
}
