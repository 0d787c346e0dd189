use image::ImageReader;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::domain::{ImageRecord, MEME_DIR};
use crate::error::{io_at, BuildError};

/// Lists `image_dir` (not recursively), sorted by file name.
pub fn list_entries(image_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut entries = fs::read_dir(image_dir)
        .map_err(io_at(image_dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_at(image_dir))?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

/// Reads width and height from the image header without decoding pixels.
/// The format is sniffed from the file's content; the extension is only a
/// fallback when the content is not recognized.
pub fn probe_image(path: &Path) -> Result<(u32, u32), BuildError> {
    ImageReader::open(path)
        .map_err(io_at(path))?
        .with_guessed_format()
        .map_err(io_at(path))?
        .into_dimensions()
        .map_err(|source| BuildError::Image {
            path: path.to_path_buf(),
            source,
        })
}

/// Builds one record per entry of `image_dir`. Fails on the first entry that
/// isn't a recognizable image.
pub fn collect_records(image_dir: &Path) -> Result<Vec<ImageRecord>, BuildError> {
    list_entries(image_dir)?
        .iter()
        .map(|path| -> Result<ImageRecord, BuildError> {
            let file_name = path
                .file_name()
                .and_then(|s| s.to_str())
                .ok_or_else(|| BuildError::NonUtf8Name { path: path.clone() })?;
            let (width, height) = probe_image(path)?;
            debug!("Probed {}: {}x{}", path.display(), width, height);
            Ok(ImageRecord {
                src: public_src(file_name),
                width,
                height,
            })
        })
        .collect()
}

fn public_src(file_name: &str) -> String {
    format!("{MEME_DIR}/{file_name}")
}

/// JSON text of the manifest, indented by two spaces.
pub fn render_manifest(records: &[ImageRecord]) -> Result<String, BuildError> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn src_uses_forward_slashes() {
        assert_eq!(public_src("cat.gif"), "jollyta/memes/cat.gif");
    }

    #[test]
    fn entries_are_sorted_by_name() {
        let tmp = tempdir().unwrap();
        for name in ["c.png", "a.png", "b.png"] {
            fs::write(tmp.path().join(name), b"").unwrap();
        }
        let names: Vec<_> = list_entries(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn missing_image_dir_is_an_io_error() {
        let tmp = tempdir().unwrap();
        let err = list_entries(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
    }

    #[test]
    fn probe_reads_png_header() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("wide.png");
        image::RgbImage::new(40, 7).save(&path).unwrap();
        assert_eq!(probe_image(&path).unwrap(), (40, 7));
    }

    #[test]
    fn probe_trusts_content_over_extension() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("actually_png.jpg");
        image::RgbImage::new(30, 20)
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        assert_eq!(probe_image(&path).unwrap(), (30, 20));
    }

    #[test]
    fn probe_reads_extensionless_png() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("meme");
        image::RgbImage::new(30, 20)
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        assert_eq!(probe_image(&path).unwrap(), (30, 20));
    }

    #[test]
    fn subdirectory_entry_aborts_collection() {
        let tmp = tempdir().unwrap();
        image::RgbImage::new(4, 4).save(tmp.path().join("a.png")).unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        assert!(collect_records(tmp.path()).is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_name_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempdir().unwrap();
        let path = tmp.path().join(OsStr::from_bytes(b"\xff.png"));
        image::RgbImage::new(4, 4)
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();

        match collect_records(tmp.path()) {
            Err(BuildError::NonUtf8Name { path: rejected }) => assert_eq!(rejected, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn probe_rejects_text() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();
        assert!(matches!(probe_image(&path), Err(BuildError::Image { .. })));
    }

    #[test]
    fn render_is_indented_array() {
        let records = vec![ImageRecord { src: "jollyta/memes/a.png".into(), width: 1, height: 2 }];
        let json = render_manifest(&records).unwrap();
        assert_eq!(
            json,
            "[\n  {\n    \"src\": \"jollyta/memes/a.png\",\n    \"width\": 1,\n    \"height\": 2\n  }\n]"
        );
    }

    #[test]
    fn empty_dir_renders_empty_array() {
        let tmp = tempdir().unwrap();
        let records = collect_records(tmp.path()).unwrap();
        assert!(records.is_empty());
        assert_eq!(render_manifest(&records).unwrap(), "[]");
    }
}
