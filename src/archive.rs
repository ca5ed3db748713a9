pub mod zip;

pub const DEFAULT_ARCHIVE_NAME: &str = "converted-images.zip";

/// Collects named entries and produces one combined buffer.
pub trait ArchiveWriter {
    /// an entry with a name that was already added replaces the earlier one
    fn add_entry(&mut self, name: &str, bytes: &[u8]) -> crate::Result<()>;

    fn finish(self) -> crate::Result<Vec<u8>>
    where
        Self: Sized;
}
