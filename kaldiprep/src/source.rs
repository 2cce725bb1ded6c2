use std::future::Future;
use std::path::Path;

use crate::error::Result;

/// Where recordings come from.
///
/// `download_document` fetches the document at `reference` (e.g.
/// `catalog/austalk/<item>/document/<media>`) and stores its bytes verbatim at
/// `dest`, returning the number of bytes written. The parent directory of
/// `dest` already exists when this is called.
pub trait DocumentSource {
    fn download_document(&self, reference: &str, dest: &Path) -> impl Future<Output = Result<u64>>;
}
