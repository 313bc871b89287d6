use crate::errors::VaultResult;

/// Turns natural-language query text into a vector comparable with the
/// stored embeddings.
pub trait IQueryEncoder: Send + Sync {
    /// Encode one query. Failures propagate to the caller unmodified.
    fn encode(&self, text: &str) -> VaultResult<Vec<f32>>;

    /// The dimensionality of vectors produced by this encoder.
    fn dimensions(&self) -> usize;

    /// Human-readable encoder name.
    fn name(&self) -> &str;

    /// Whether this encoder is currently usable.
    fn is_available(&self) -> bool;
}

impl<T: IQueryEncoder + ?Sized> IQueryEncoder for Box<T> {
    fn encode(&self, text: &str) -> VaultResult<Vec<f32>> {
        (**self).encode(text)
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
