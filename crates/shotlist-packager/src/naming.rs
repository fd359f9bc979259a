//! File names for downloads.

use shotlist_models::Shot;

/// `{sequence:02}_{shot type}.jpg`, e.g. `03_Hero-Lifestyle.jpg`.
///
/// The shot type comes from the planner, so whitespace, path separators,
/// quotes and control characters all become dashes.
pub fn shot_file_name(shot: &Shot) -> String {
    format!(
        "{:02}_{}.jpg",
        shot.sequence_number,
        file_name_component(&shot.shot_type)
    )
}

/// `{scene_id}.zip`, cleaned the same way as shot types.
pub fn archive_file_name(scene_id: &str) -> String {
    let stem = file_name_component(scene_id.trim());
    if stem.is_empty() {
        "scene.zip".to_string()
    } else {
        format!("{}.zip", stem)
    }
}

fn file_name_component(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '/' | '\\' | '"' => '-',
            c if c.is_whitespace() || c.is_control() => '-',
            c => c,
        })
        .collect()
}
