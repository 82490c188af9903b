//! Conversion from the GitHub client's file records.

use crate::model::{ChangedFile, FileStatus};
use gh_client::PullRequestFile;

impl From<PullRequestFile> for ChangedFile {
    fn from(file: PullRequestFile) -> Self {
        Self {
            status: FileStatus::from_api(&file.status),
            filename: file.filename,
            additions: file.additions,
            deletions: file.deletions,
            changes: file.changes,
            patch: file.patch,
            previous_filename: file.previous_filename,
            blob_url: file.blob_url,
            raw_url: file.raw_url,
        }
    }
}
