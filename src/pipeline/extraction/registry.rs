use std::path::Path;

use super::docx::DocxStrategy;
use super::ocr::{default_ocr_engine, ImageStrategy};
use super::pdf::PdfStrategy;
use super::text_only::PlainTextStrategy;
use super::types::{ExtractionResult, ExtractorStrategy, OcrEngine, PdfExtractor};
use super::ExtractionError;
use crate::pipeline::import::{file_extension, DocumentFormat};

/// Maps each supported format to the strategy that reads it.
/// Built once at startup and shared read-only afterwards.
pub struct ExtractorRegistry {
    pdf: PdfStrategy,
    docx: DocxStrategy,
    image: ImageStrategy,
    plain_text: PlainTextStrategy,
}

impl ExtractorRegistry {
    pub fn new(ocr: Box<dyn OcrEngine>, pdf: Box<dyn PdfExtractor>) -> Self {
        Self {
            pdf: PdfStrategy::new(pdf),
            docx: DocxStrategy,
            image: ImageStrategy::new(ocr),
            plain_text: PlainTextStrategy,
        }
    }

    /// pdf-extract for PDFs and the best OCR engine this build offers.
    pub fn with_defaults(tessdata_dir: Option<&Path>) -> Self {
        Self {
            pdf: PdfStrategy::default(),
            docx: DocxStrategy,
            image: ImageStrategy::new(default_ocr_engine(tessdata_dir)),
            plain_text: PlainTextStrategy,
        }
    }

    pub fn resolve(&self, format: DocumentFormat) -> &dyn ExtractorStrategy {
        match format {
            DocumentFormat::Pdf => &self.pdf,
            DocumentFormat::Docx => &self.docx,
            DocumentFormat::Image => &self.image,
            DocumentFormat::PlainText => &self.plain_text,
        }
    }

    /// Strategy for a lowercase-or-not extension with its leading dot. No I/O.
    pub fn resolve_extension(
        &self,
        extension: &str,
    ) -> Result<&dyn ExtractorStrategy, ExtractionError> {
        let lowered = extension.to_lowercase();
        DocumentFormat::from_extension(&lowered)
            .map(|format| self.resolve(format))
            .ok_or(ExtractionError::UnsupportedFormat(lowered))
    }

    pub fn resolve_filename(
        &self,
        filename: &str,
    ) -> Result<&dyn ExtractorStrategy, ExtractionError> {
        self.resolve_extension(&file_extension(filename))
    }

    /// Run the strategy for `format` against a stored file.
    pub fn extract(
        &self,
        path: &Path,
        format: DocumentFormat,
    ) -> Result<ExtractionResult, ExtractionError> {
        let strategy = self.resolve(format);
        let text = strategy.extract_text(path)?;

        tracing::info!(
            format = %format,
            chars = text.len(),
            "Text extraction complete"
        );

        Ok(ExtractionResult {
            text,
            source_format: format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::MockOcrEngine;
    use crate::pipeline::import::ACCEPTED_EXTENSIONS;

    struct NoPages;

    impl PdfExtractor for NoPages {
        fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
            Ok(vec![])
        }
    }

    fn registry() -> ExtractorRegistry {
        ExtractorRegistry::new(
            Box::new(MockOcrEngine::new("scanned text", 0.9)),
            Box::new(NoPages),
        )
    }

    #[test]
    fn every_accepted_extension_resolves() {
        let registry = registry();
        for ext in ACCEPTED_EXTENSIONS {
            assert!(registry.resolve_extension(ext).is_ok(), "{ext} should resolve");
        }
    }

    #[test]
    fn resolves_expected_strategy_per_extension() {
        let registry = registry();
        let cases = [
            ("brief.pdf", DocumentFormat::Pdf),
            ("lease.docx", DocumentFormat::Docx),
            ("photo.jpg", DocumentFormat::Image),
            ("photo.jpeg", DocumentFormat::Image),
            ("scan.png", DocumentFormat::Image),
            ("scan.bmp", DocumentFormat::Image),
            ("scan.tiff", DocumentFormat::Image),
            ("notes.txt", DocumentFormat::PlainText),
        ];
        for (name, expected) in cases {
            assert_eq!(registry.resolve_filename(name).unwrap().format(), expected, "{name}");
        }
    }

    #[test]
    fn uppercase_extension_resolves() {
        let registry = registry();
        assert_eq!(
            registry.resolve_extension(".PDF").unwrap().format(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            registry.resolve_filename("SCAN.JPEG").unwrap().format(),
            DocumentFormat::Image
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let registry = registry();
        for name in ["macro.xlsx", "old.doc", "archive.zip", "README"] {
            let err = registry.resolve_filename(name).err().unwrap();
            assert!(matches!(err, ExtractionError::UnsupportedFormat(_)), "{name}");
        }
    }

    #[test]
    fn resolve_does_no_io_for_missing_files() {
        let registry = registry();
        assert!(registry.resolve_filename("/nonexistent/dir/file.pdf").is_ok());
    }

    #[test]
    fn extract_tags_result_with_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Hearing on May 3").unwrap();

        let result = registry().extract(&path, DocumentFormat::PlainText).unwrap();
        assert_eq!(result.text, "Hearing on May 3");
        assert_eq!(result.source_format, DocumentFormat::PlainText);
    }

    #[test]
    fn extract_image_goes_through_ocr_engine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, [0u8; 4]).unwrap();

        let result = registry().extract(&path, DocumentFormat::Image).unwrap();
        assert_eq!(result.text, "scanned text");
    }
}
