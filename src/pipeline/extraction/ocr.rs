use std::path::Path;

use super::types::{ExtractorStrategy, OcrEngine, OcrPageResult};
use super::ExtractionError;
use crate::pipeline::import::DocumentFormat;

/// Tesseract OCR engine.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct BundledTesseract {
    tessdata_dir: Option<std::path::PathBuf>,
    lang: String,
}

#[cfg(feature = "ocr")]
impl BundledTesseract {
    /// Use `tessdata_dir` when given, otherwise the system tessdata location.
    pub fn new(tessdata_dir: Option<&Path>) -> Result<Self, ExtractionError> {
        if let Some(dir) = tessdata_dir {
            if !dir.join("eng.traineddata").exists() {
                return Err(ExtractionError::OcrUnavailable(format!(
                    "tessdata not found at {}",
                    dir.display()
                )));
            }
        }

        Ok(Self {
            tessdata_dir: tessdata_dir.map(Path::to_path_buf),
            lang: "eng".to_string(),
        })
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for BundledTesseract {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError> {
        let tessdata = match &self.tessdata_dir {
            Some(dir) => Some(dir.to_str().ok_or_else(|| {
                ExtractionError::OcrUnavailable("tessdata path is not valid UTF-8".into())
            })?),
            None => None,
        };

        let tess = tesseract::Tesseract::new(tessdata, Some(self.lang.as_str()))
            .map_err(|e| ExtractionError::OcrUnavailable(format!("{e:?}")))?;

        let mut tess = tess
            .set_image_from_mem(image_bytes)
            .map_err(|e| ExtractionError::failed(DocumentFormat::Image, format!("{e:?}")))?;

        let text = tess
            .get_text()
            .map_err(|e| ExtractionError::failed(DocumentFormat::Image, format!("{e:?}")))?;

        let confidence = tess.mean_text_conf().max(0) as f32 / 100.0;

        Ok(OcrPageResult { text, confidence })
    }
}

/// Stand-in engine for builds without the `ocr` feature: image uploads fail
/// with a clear message instead of silently returning nothing.
pub struct DisabledOcrEngine;

impl OcrEngine for DisabledOcrEngine {
    fn ocr_image(&self, _image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError> {
        Err(ExtractionError::OcrUnavailable(
            "built without the `ocr` feature".into(),
        ))
    }
}

/// Best OCR engine this build can offer.
pub fn default_ocr_engine(tessdata_dir: Option<&Path>) -> Box<dyn OcrEngine> {
    #[cfg(feature = "ocr")]
    {
        match BundledTesseract::new(tessdata_dir) {
            Ok(engine) => return Box::new(engine),
            Err(e) => tracing::warn!(error = %e, "Tesseract unavailable, image OCR disabled"),
        }
    }
    #[cfg(not(feature = "ocr"))]
    {
        let _ = tessdata_dir;
        tracing::info!("Built without OCR support, image uploads will be rejected");
    }
    Box::new(DisabledOcrEngine)
}

/// Mock OCR engine for unit testing without Tesseract.
pub struct MockOcrEngine {
    pub text: String,
    pub confidence: f32,
}

impl MockOcrEngine {
    pub fn new(text: &str, confidence: f32) -> Self {
        Self {
            text: text.to_string(),
            confidence,
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, _image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError> {
        Ok(OcrPageResult {
            text: self.text.clone(),
            confidence: self.confidence,
        })
    }
}

/// Scanned-image strategy: OCR over the whole image, output trimmed.
/// No denoise/deskew; quality is left to the engine.
pub struct ImageStrategy {
    engine: Box<dyn OcrEngine>,
}

impl ImageStrategy {
    pub fn new(engine: Box<dyn OcrEngine>) -> Self {
        Self { engine }
    }
}

impl ExtractorStrategy for ImageStrategy {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Image
    }

    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes =
            std::fs::read(path).map_err(|e| ExtractionError::failed(DocumentFormat::Image, e))?;
        let result = self.engine.ocr_image(&bytes)?;

        tracing::debug!(
            confidence = result.confidence,
            chars = result.text.len(),
            "OCR complete"
        );

        Ok(result.text.trim().to_string())
    }
}
