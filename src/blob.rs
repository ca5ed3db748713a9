use std::collections::HashMap;
use std::fmt::Display;

/// Reference to bytes held by a [`BlobRegistry`], valid until revoked.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlobHandle(u64);

impl Display for BlobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "blob:{}", self.0)
    }
}

pub struct Blob {
    bytes: Vec<u8>,
    mime_type: &'static str,
}

impl Blob {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }
}

/// In-memory store behind preview and output handles.
///
/// Every handle created here must be revoked by its owner, otherwise the bytes
/// stay alive for as long as the registry does.
#[derive(Default)]
pub struct BlobRegistry {
    blobs: HashMap<BlobHandle, Blob>,
    next_id: u64,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, bytes: Vec<u8>, mime_type: &'static str) -> BlobHandle {
        let handle = BlobHandle(self.next_id);
        self.next_id += 1;
        self.blobs.insert(handle.clone(), Blob { bytes, mime_type });
        log::trace!("Created {} ({})", handle, mime_type);
        handle
    }

    pub fn get(&self, handle: &BlobHandle) -> Option<&Blob> {
        self.blobs.get(handle)
    }

    /// returns false when the handle was already revoked
    pub fn revoke(&mut self, handle: &BlobHandle) -> bool {
        let revoked = self.blobs.remove(handle).is_some();
        if !revoked {
            log::debug!("{} was already revoked", handle);
        }
        revoked
    }

    pub fn live_count(&self) -> usize {
        self.blobs.len()
    }
}
