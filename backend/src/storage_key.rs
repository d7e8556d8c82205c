//! Object key derivation for generated QR codes

use sha2::{Digest, Sha256};
use strum::{Display, EnumString};

/// Folder every generated QR code is stored under
pub const QR_CODE_FOLDER: &str = "qr_codes";

/// File extension of stored QR codes
pub const QR_CODE_EXTENSION: &str = "png";

/// Policy mapping the encoded text to an object key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum StorageKeyStrategy {
    /// Drops the scheme prefix and uses the rest of the input as the file name.
    ///
    /// Inputs differing only by scheme share a key, and any `/`, `?` or `#`
    /// left in the remainder ends up in the key as is.
    #[default]
    SchemeStripped,
    /// Names the object after the SHA-256 of the full input
    ContentHash,
}

impl StorageKeyStrategy {
    /// Derives the object key for `input`
    #[must_use]
    pub fn derive_key(self, input: &str) -> String {
        let name = match self {
            Self::SchemeStripped => strip_scheme(input).to_string(),
            Self::ContentHash => hex::encode(Sha256::digest(input.as_bytes())),
        };

        format!("{QR_CODE_FOLDER}/{name}.{QR_CODE_EXTENSION}")
    }
}

/// Returns everything after the first `//`, or the whole input when there is none
fn strip_scheme(input: &str) -> &str {
    input.split_once("//").map_or(input, |(_, rest)| rest)
}
