use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::facade::error::FacadeError;

/// The 16-byte header every preprocessed file opens with: magic bytes,
/// the producing host's endianness and pointer width, and a version
/// pair. Readers refuse a mismatch rather than risk misinterpreting
/// the bytes that follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct Fingerprint {
    magic: [u8; 4],
    little_endian: u8,
    pointer_width: u8,
    version_major: u8,
    version_minor: u8,
    _reserved: [u8; 8],
}

const MAGIC: [u8; 4] = *b"CRTX";
const VERSION_MAJOR: u8 = 1;
const VERSION_MINOR: u8 = 0;

impl Fingerprint {
    /// The fingerprint this build of the crate writes and expects.
    pub fn current() -> Self {
        Fingerprint {
            magic: MAGIC,
            little_endian: cfg!(target_endian = "little") as u8,
            pointer_width: std::mem::size_of::<usize>() as u8,
            version_major: VERSION_MAJOR,
            version_minor: VERSION_MINOR,
            _reserved: [0; 8],
        }
    }

    /// Validates `self` (read from disk) against [`Fingerprint::current`].
    pub fn validate(&self) -> Result<(), FacadeError> {
        let expected = Fingerprint::current();
        if *self != expected {
            return Err(FacadeError::FingerprintMismatch {
                expected,
                found: *self,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn current_validates_against_itself() {
        assert!(Fingerprint::current().validate().is_ok());
    }

    #[test]
    fn mismatched_version_is_rejected() {
        let mut bad = Fingerprint::current();
        bad.version_major += 1;
        assert!(bad.validate().is_err());
    }
}
