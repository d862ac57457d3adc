pub mod directory;
pub mod error;
pub mod source;
pub mod vcf;

pub use directory::{load_directory, CandidateLoad};
pub use error::{Result, SyncError};
pub use source::{CandidateSource, VcfDirectorySource};
