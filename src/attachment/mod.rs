//! File selection, upload and download.

mod disposition;
mod policy;
mod service;

pub use disposition::{parse_filename, DEFAULT_FILE_NAME};
pub use policy::{
    AttachmentPolicy, PreparedAttachment, SelectedFile, SelectionListener, SelectionWarnings,
};
pub use service::{AttachmentError, AttachmentKind, AttachmentService, DownloadedFile};
