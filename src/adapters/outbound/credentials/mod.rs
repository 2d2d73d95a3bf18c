mod gcloud_profile;
mod key_file;
mod metadata;
mod token_files;

pub use gcloud_profile::{CachedAccount, GcloudProfileSource};
pub use key_file::KeyFileSource;
pub use metadata::{MetadataServerSource, DEFAULT_METADATA_URL};
pub use token_files::{token_file_label, AccessTokenFileSource, RefreshTokenFileSource};
