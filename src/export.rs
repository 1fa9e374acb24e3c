use rand::{rngs::OsRng, RngCore};

pub const SUFFIX_BYTES: usize = 8;

/// `len` bytes from the OS (browser: `crypto.getRandomValues`), hex encoded.
pub fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// `<prefix>_<16 hex chars>.<extension>`
pub fn download_filename(prefix: &str, extension: &str) -> String {
    let suffix = random_hex(SUFFIX_BYTES);
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        format!("{}_{}", prefix, suffix)
    } else {
        format!("{}_{}.{}", prefix, suffix, extension)
    }
}
