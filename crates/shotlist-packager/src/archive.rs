//! Single-shot downloads and whole-scene ZIP archives.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use shotlist_models::{SceneData, Shot};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{PackagerError, PackagerResult};
use crate::naming::{archive_file_name, shot_file_name};

pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// A named file ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The rendered image of one shot, or `None` if it has not been rendered.
pub fn download_one(shot: &Shot) -> Option<DownloadFile> {
    let image = shot.rendered_image.as_ref()?;
    Some(DownloadFile {
        file_name: shot_file_name(shot),
        content_type: image.media_type().as_str().to_string(),
        bytes: image.bytes().to_vec(),
    })
}

/// Archive every rendered shot of `scene`, one entry per shot.
///
/// Shots without an image are skipped. Entries are stored uncompressed since
/// the images are already JPEG.
pub fn download_all(scene: &SceneData) -> PackagerResult<DownloadFile> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut names = HashSet::new();

    for shot in scene.completed_shots() {
        let Some(image) = shot.rendered_image.as_ref() else {
            continue;
        };

        let name = shot_file_name(shot);
        if !names.insert(name.clone()) {
            return Err(PackagerError::DuplicateEntry(name));
        }

        debug!(entry = %name, size = image.len(), "Adding archive entry");
        writer.start_file(name.as_str(), options)?;
        writer.write_all(image.bytes())?;
    }

    let bytes = writer.finish()?.into_inner();
    let file_name = archive_file_name(&scene.scene_id);

    info!(
        scene_id = %scene.scene_id,
        entries = names.len(),
        size = bytes.len(),
        "Scene archive built"
    );

    Ok(DownloadFile {
        file_name,
        content_type: ZIP_CONTENT_TYPE.to_string(),
        bytes,
    })
}
