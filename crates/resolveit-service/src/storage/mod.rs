//! Attachment storage backends

mod local;

pub use local::{sanitize_file_name, LocalAttachmentStore, PUBLIC_PREFIX};
