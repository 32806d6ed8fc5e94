//! Office Open XML artifact generation.
//!
//! This module handles:
//! - Assembling OPC packages (the zip container both formats share)
//! - Filling the fixed docx narrative template
//! - Filling the fixed four-slide pptx template
//!
//! The generators perform no graph logic; each takes a flat outline and
//! returns complete document bytes plus a suggested download filename.

mod docx;
mod pptx;

pub use docx::build_docx;
pub use pptx::build_pptx;

use std::borrow::Cow;
use std::io::{Cursor, Write as _};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Failure while assembling an OPC package.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("failed to write package part: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An in-memory OPC package under construction.
pub(crate) struct Package {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl Package {
    pub(crate) fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Add one XML part at `path`.
    pub(crate) fn part(&mut self, path: &str, xml: &str) -> Result<(), PackageError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.zip.start_file(path, options)?;
        self.zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<Vec<u8>, PackageError> {
        Ok(self.zip.finish()?.into_inner())
    }
}

/// Escape text for embedding in an XML part.
pub(crate) fn xml_escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Derive a download filename from a title.
///
/// ASCII-only so the result is always a valid `Content-Disposition` value.
pub(crate) fn filename_slug(title: &str, fallback: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let slug = slug.trim_matches('_').to_string();
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_produces_zip_container() {
        let mut package = Package::new();
        package.part("test.xml", "<a/>").unwrap();
        let bytes = package.finish().unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[test]
    fn test_filename_slug_normalizes_titles() {
        assert_eq!(filename_slug("Informe Anual 2026", "documento"), "informe_anual_2026");
        assert_eq!(filename_slug("  ", "documento"), "documento");
        assert_eq!(filename_slug("¡Hola!", "documento"), "hola");
    }

    #[test]
    fn test_xml_escape_handles_markup() {
        assert_eq!(xml_escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }
}
