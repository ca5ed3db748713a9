use std::io::{Cursor, Write};

use ::zip::write::SimpleFileOptions;
use ::zip::{CompressionMethod, ZipWriter};

use super::ArchiveWriter;
use crate::error::Error;

pub struct ZipArchiveWriter {
    entries: Vec<(String, Vec<u8>)>,
    compression_method: CompressionMethod,
}

impl ZipArchiveWriter {
    pub fn new() -> Self {
        Self::with_compression_method(CompressionMethod::Deflated)
    }

    pub fn with_compression_method(compression_method: CompressionMethod) -> Self {
        Self {
            entries: Vec::new(),
            compression_method,
        }
    }
}

impl Default for ZipArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveWriter for ZipArchiveWriter {
    fn add_entry(&mut self, name: &str, bytes: &[u8]) -> crate::Result<()> {
        // ZIP forbids duplicate names, the last entry wins
        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => {
                log::warn!("Archive entry '{}' is overwritten", name);
                entry.1 = bytes.to_vec();
            }
            None => self.entries.push((name.to_owned(), bytes.to_vec())),
        }
        Ok(())
    }

    fn finish(self) -> crate::Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in self.entries {
            let options =
                SimpleFileOptions::default().compression_method(self.compression_method);
            writer.start_file(name, options)?;
            writer
                .write_all(&bytes)
                .map_err(|e| Error::FailedToWriteArchive(e.to_string()))?;
        }
        Ok(writer.finish()?.into_inner())
    }
}
