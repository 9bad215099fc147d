//! Content-addressed event identifiers.

use mdigest_core::Category;
use sha1::{Digest, Sha1};

/// Number of hex characters of the SHA-1 digest kept in an id (40 bits).
const DIGEST_HEX_LEN: usize = 10;

/// `<PREFIX>_<first 10 hex chars of SHA-1(link)>`.
///
/// Stable across runs for the same link, so re-ingesting a feed overwrites
/// rather than duplicates. The category prefix keeps official and news ids
/// disjoint even when both point at the same URL.
#[must_use]
pub fn event_id(category: Category, link: &str) -> String {
    let digest = format!("{:x}", Sha1::digest(link.as_bytes()));
    format!("{}_{}", category.id_prefix(), &digest[..DIGEST_HEX_LEN])
}
