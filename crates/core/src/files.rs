use std::path::Path;

/// Derive the local filename for a translated download:
/// `<original-stem>_translated.<ext>`. Files without an extension keep the
/// bare `_translated` suffix.
pub fn translated_filename(original: &str) -> String {
    let path = Path::new(original);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("translated");
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_translated.{ext}"),
        None => format!("{stem}_translated"),
    }
}

#[cfg(test)]
mod tests {
    use super::translated_filename;

    #[test]
    fn keeps_original_extension() {
        assert_eq!(translated_filename("report.docx"), "report_translated.docx");
        assert_eq!(translated_filename("scan.PNG"), "scan_translated.PNG");
    }

    #[test]
    fn uses_the_final_path_component() {
        assert_eq!(
            translated_filename("/data/files/notes.pdf"),
            "notes_translated.pdf"
        );
        assert_eq!(
            translated_filename("C:/media/photo.jpg"),
            "photo_translated.jpg"
        );
    }

    #[test]
    fn handles_missing_extension() {
        assert_eq!(translated_filename("README"), "README_translated");
    }
}
