use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Extensions accepted at the upload boundary, lowercase with the leading dot.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    ".pdf", ".docx", ".jpg", ".jpeg", ".png", ".bmp", ".tiff", ".txt",
];

/// Declared document format, derived from the filename extension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Image,
    PlainText,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Image => "image",
            Self::PlainText => "plain_text",
        }
    }

    /// Map a lowercase extension (with leading dot) to a format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            ".pdf" => Some(Self::Pdf),
            ".docx" => Some(Self::Docx),
            ".jpg" | ".jpeg" | ".png" | ".bmp" | ".tiff" => Some(Self::Image),
            ".txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::from_extension(&file_extension(filename))
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased extension of `filename` including the dot, or "" when there is none.
///
/// Follows the usual splitext rule: a leading dot (".env") is part of the stem.
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Extension as written by the client (original case), used when naming staged files.
pub fn original_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

pub fn accepted_extensions_list() -> String {
    ACCEPTED_EXTENSIONS.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_accepted_extension_maps_to_a_format() {
        for ext in ACCEPTED_EXTENSIONS {
            assert!(
                DocumentFormat::from_extension(ext).is_some(),
                "{ext} should be recognised"
            );
        }
    }

    #[test]
    fn image_extensions_share_one_format() {
        for name in ["a.jpg", "a.jpeg", "a.png", "a.bmp", "a.tiff"] {
            assert_eq!(DocumentFormat::from_filename(name), Some(DocumentFormat::Image));
        }
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_filename("LEASE.PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_filename("Notice.Docx"), Some(DocumentFormat::Docx));
    }

    #[test]
    fn unknown_or_missing_extension_rejected() {
        assert_eq!(DocumentFormat::from_filename("evil.exe"), None);
        assert_eq!(DocumentFormat::from_filename("README"), None);
        assert_eq!(DocumentFormat::from_filename("scan.tif"), None);
        assert_eq!(DocumentFormat::from_filename("old.doc"), None);
    }

    #[test]
    fn dotfile_has_no_extension() {
        assert_eq!(file_extension(".txt"), "");
    }

    #[test]
    fn only_last_extension_counts() {
        assert_eq!(file_extension("archive.tar.txt"), ".txt");
        assert_eq!(DocumentFormat::from_filename("contract.pdf.exe"), None);
    }

    #[test]
    fn original_extension_keeps_case() {
        assert_eq!(original_extension("Scan.PNG"), ".PNG");
        assert_eq!(original_extension("noext"), "");
    }
}
