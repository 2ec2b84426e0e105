//! Upload security for team logos.
//!
//! Uploaded bytes are gated by magic-byte sniffing (the client-supplied
//! content type and extension are never trusted), filenames are sanitized
//! against path traversal, and each team has a storage quota.

use rand::Rng;

use crate::errors::AppError;

/// Maximum accepted file size: 5 MiB.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Storage quota per team: 10 MiB, allowing a few logo revisions.
pub const TEAM_STORAGE_QUOTA: u64 = 10 * 1024 * 1024;

/// Maximum length of the sanitized filename component.
const MAX_NAME_LENGTH: usize = 200;

/// Image formats accepted for logos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Svg,
}

impl ImageKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
            ImageKind::Svg => "svg",
        }
    }
}

/// Identify the image format from file content.
///
/// PNG and JPEG are matched on their signatures; SVG is matched by finding
/// an `<svg` root within the leading bytes (allowing an XML prolog,
/// comments and whitespace).
pub fn sniff_image(bytes: &[u8]) -> Option<ImageKind> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]) {
        return Some(ImageKind::Png);
    }
    if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        return Some(ImageKind::Jpeg);
    }
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]);
    let trimmed = head.trim_start();
    if (trimmed.starts_with("<?xml") || trimmed.starts_with("<svg")) && head.contains("<svg") {
        return Some(ImageKind::Svg);
    }
    None
}

/// Strip a client-supplied filename down to a safe storage component.
///
/// Path components and separators are removed, null bytes dropped, and the
/// remainder restricted to `[A-Za-z0-9._-]` with a length cap. An empty or
/// dot-only result falls back to a fixed name.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .replace('\0', "");

    let mut name: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.len() > MAX_NAME_LENGTH {
        match name.rfind('.') {
            Some(dot) if name.len() - dot < 16 => {
                let ext = name[dot..].to_string();
                name.truncate(MAX_NAME_LENGTH - ext.len());
                name.push_str(&ext);
            }
            _ => name.truncate(MAX_NAME_LENGTH),
        }
    }

    if name.is_empty() || name == "." || name == ".." {
        "uploaded_file".to_string()
    } else {
        name
    }
}

/// Validate an upload, returning the sniffed format and the safe filename.
///
/// The filename extension is normalized to the sniffed format, so a stored
/// name never claims a type the content does not have.
pub fn validate_upload(filename: &str, bytes: &[u8]) -> Result<(ImageKind, String), AppError> {
    if bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
    }
    if bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::PayloadTooLarge(format!(
            "File exceeds the {} MiB limit",
            MAX_FILE_SIZE / (1024 * 1024)
        )));
    }
    let kind = sniff_image(bytes).ok_or_else(|| {
        AppError::UnsupportedMediaType(
            "File content is not a PNG, JPEG or SVG image".to_string(),
        )
    })?;

    let mut name = sanitize_filename(filename);
    if !extension_matches(kind, &name) {
        name = format!("{}.{}", name.trim_end_matches('.'), kind.extension());
    }
    Ok((kind, name))
}

fn extension_matches(kind: ImageKind, name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    match kind {
        ImageKind::Png => lower.ends_with(".png"),
        ImageKind::Jpeg => lower.ends_with(".jpg") || lower.ends_with(".jpeg"),
        ImageKind::Svg => lower.ends_with(".svg"),
    }
}

/// Build the on-disk name: team id, random nonce, sanitized original name.
/// The nonce prevents collisions and overwrites across re-uploads.
pub fn storage_name(team_id: &str, sanitized: &str) -> String {
    let nonce = format!("{:016x}", rand::thread_rng().gen::<u64>());
    format!("{}_{}_{}", team_id, nonce, sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0];

    #[test]
    fn sniffs_png_and_jpeg_signatures() {
        assert_eq!(sniff_image(PNG_HEADER), Some(ImageKind::Png));
        assert_eq!(
            sniff_image(&[0xff, 0xd8, 0xff, 0xe0, 0x00]),
            Some(ImageKind::Jpeg)
        );
    }

    #[test]
    fn sniffs_svg_with_and_without_prolog() {
        assert_eq!(
            sniff_image(b"<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>"),
            Some(ImageKind::Svg)
        );
        assert_eq!(
            sniff_image(b"<?xml version=\"1.0\"?>\n<svg></svg>"),
            Some(ImageKind::Svg)
        );
    }

    #[test]
    fn rejects_non_image_content() {
        assert_eq!(sniff_image(b"#!/bin/sh\nrm -rf /"), None);
        assert_eq!(sniff_image(b"GIF89a....."), None);
    }

    #[test]
    fn strips_path_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("logo\0.png"), "logo.png");
    }

    #[test]
    fn restricts_the_character_set() {
        assert_eq!(sanitize_filename("my logo (v2).png"), "my_logo__v2_.png");
    }

    #[test]
    fn empty_or_dot_names_get_a_fallback() {
        assert_eq!(sanitize_filename(""), "uploaded_file");
        assert_eq!(sanitize_filename(".."), "uploaded_file");
    }

    #[test]
    fn long_names_keep_their_extension() {
        let long = format!("{}.png", "a".repeat(400));
        let sanitized = sanitize_filename(&long);
        assert!(sanitized.len() <= 200);
        assert!(sanitized.ends_with(".png"));
    }

    #[test]
    fn validate_enforces_size_before_format() {
        let oversized = vec![0u8; MAX_FILE_SIZE + 1];
        assert!(matches!(
            validate_upload("big.png", &oversized),
            Err(AppError::PayloadTooLarge(_))
        ));
        assert!(matches!(
            validate_upload("note.txt", b"just text"),
            Err(AppError::UnsupportedMediaType(_))
        ));
        let (kind, name) = validate_upload("crest.png", PNG_HEADER).unwrap();
        assert_eq!(kind, ImageKind::Png);
        assert_eq!(name, "crest.png");
    }

    #[test]
    fn mismatched_extension_is_normalized_to_the_sniffed_type() {
        let (_, name) = validate_upload("logo.txt", PNG_HEADER).unwrap();
        assert_eq!(name, "logo.txt.png");
        let (_, name) = validate_upload("photo.JPEG", &[0xff, 0xd8, 0xff, 0xe1]).unwrap();
        assert_eq!(name, "photo.JPEG");
    }

    #[test]
    fn storage_names_do_not_collide() {
        let a = storage_name("team-1", "logo.png");
        let b = storage_name("team-1", "logo.png");
        assert_ne!(a, b);
        assert!(a.starts_with("team-1_"));
    }
}
