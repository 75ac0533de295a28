//! Image resolution - mapping numeric image ids to URL-like tokens.
//!
//! The parser knows nothing about where images live. Callers hand it a
//! resolver per call; "not found" is an ordinary answer, not an error.

use std::collections::{BTreeMap, HashMap};

/// Looks up a URL for a Glk image resource number.
///
/// Implementations must be pure lookups. A resolver that can fail returns
/// `None` instead of propagating the failure.
pub trait ImageResolver {
    fn resolve(&self, image: u32) -> Option<String>;
}

impl<F> ImageResolver for F
where
    F: Fn(u32) -> Option<String>,
{
    fn resolve(&self, image: u32) -> Option<String> {
        self(image)
    }
}

impl ImageResolver for HashMap<u32, String> {
    fn resolve(&self, image: u32) -> Option<String> {
        self.get(&image).cloned()
    }
}

impl ImageResolver for BTreeMap<u32, String> {
    fn resolve(&self, image: u32) -> Option<String> {
        self.get(&image).cloned()
    }
}

/// A resolver that knows no images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve(&self, _image: u32) -> Option<String> {
        None
    }
}
