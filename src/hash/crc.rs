/// Streaming CRC32 digest with the same shape as the RustCrypto hashers
///
/// The finalized value is the big-endian byte encoding of the checksum, so
/// its hex form reads like the conventional `%08x` rendering.
#[derive(Clone, Default)]
pub struct Crc32 {
    hasher: crc32fast::Hasher,
}

impl Crc32 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
    }

    pub fn finalize(self) -> [u8; 4] {
        self.hasher.finalize().to_be_bytes()
    }
}
