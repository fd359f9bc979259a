//! Packaging of rendered shots for download.
//!
//! Single shots are served as JPEG files named after their sequence number
//! and shot type; a whole scene is served as one ZIP archive.

pub mod archive;
pub mod error;
pub mod naming;

pub use archive::{download_all, download_one, DownloadFile, ZIP_CONTENT_TYPE};
pub use error::{PackagerError, PackagerResult};
pub use naming::{archive_file_name, shot_file_name};
