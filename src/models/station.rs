use std::hash::{Hash, Hasher};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Raw station name bytes borrowed from the input, plus a content hash.
///
/// The hash only picks the bucket: equality always compares the bytes, so two
/// different names that collide are still kept apart.
#[derive(Debug, Clone, Copy)]
pub struct StationKey<'a> {
    name: &'a [u8],
    hash: u64,
}

impl<'a> StationKey<'a> {
    #[inline]
    pub fn new(name: &'a [u8]) -> Self {
        Self::with_hash(name, fnv1a(name))
    }

    /// Key with an explicit hash. Lets tests force collisions.
    #[inline]
    pub fn with_hash(name: &'a [u8], hash: u64) -> Self {
        Self { name, hash }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.name
    }

    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.name).ok()
    }
}

impl PartialEq for StationKey<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.name == other.name
    }
}

impl Eq for StationKey<'_> {}

impl Hash for StationKey<'_> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

#[inline]
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(FNV_OFFSET, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}
