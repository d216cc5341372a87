//! Extension-to-MIME lookup.
//!
//! Used by the verifier as a secondary confirmation after a magic-byte
//! match: the MIME type guessed from the file's own name must agree with
//! the MIME type registered for the requested extension.

use std::path::Path;

use super::normalize_extension;

/// MIME types for the extensions the signature catalog knows about.
const MIME_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("webp", "image/webp"),
    ("ico", "image/vnd.microsoft.icon"),
    ("psd", "image/vnd.adobe.photoshop"),
    ("zip", "application/zip"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("doc", "application/msword"),
    ("xls", "application/vnd.ms-excel"),
    ("ppt", "application/vnd.ms-powerpoint"),
    ("rtf", "application/rtf"),
    ("gz", "application/gzip"),
    ("bz2", "application/x-bzip2"),
    ("xz", "application/x-xz"),
    ("7z", "application/x-7z-compressed"),
    ("rar", "application/vnd.rar"),
    ("tar", "application/x-tar"),
    ("iso", "application/x-iso9660-image"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/x-wav"),
    ("flac", "audio/flac"),
    ("ogg", "audio/ogg"),
    ("mp4", "video/mp4"),
    ("avi", "video/x-msvideo"),
    ("mkv", "video/x-matroska"),
    ("exe", "application/x-msdownload"),
    ("dll", "application/x-msdownload"),
    ("class", "application/java-vm"),
    ("wasm", "application/wasm"),
    ("sqlite", "application/vnd.sqlite3"),
];

/// Look up the MIME type registered for a normalized extension.
#[must_use]
pub fn for_extension(extension: &str) -> Option<&'static str> {
    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Guess the MIME type of a path from its name alone.
#[must_use]
pub fn guess(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?;
    for_extension(&normalize_extension(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_for_extension() {
        assert_eq!(for_extension("pdf"), Some("application/pdf"));
        assert_eq!(for_extension("jpg"), Some("image/jpeg"));
        assert_eq!(for_extension("jpeg"), Some("image/jpeg"));
        assert_eq!(for_extension("nonsense"), None);
    }

    #[test]
    fn test_guess_from_path() {
        assert_eq!(guess(Path::new("/d/report.PDF")), Some("application/pdf"));
        assert_eq!(guess(Path::new("photo.jpeg")), Some("image/jpeg"));
        assert_eq!(guess(Path::new("no_extension")), None);
        assert_eq!(guess(Path::new("file.unknown")), None);
    }

    #[test]
    fn test_every_catalog_extension_has_a_mime_type() {
        let catalog = crate::signature::SignatureCatalog::load().unwrap();
        for extension in catalog.known_extensions() {
            assert!(
                for_extension(&extension).is_some(),
                "no MIME type for '{}'",
                extension
            );
        }
    }
}
