use std::fmt;

/// A callback passed down through props, such as `on_submit`.
///
/// The default handler does nothing, so props structs holding one can still
/// derive `Default`.
pub struct Handler<T>(Option<Box<dyn FnMut(T) + Send + Sync>>);

impl<T> Handler<T> {
    /// Whether no callback was ever set.
    pub fn is_default(&self) -> bool {
        self.0.is_none()
    }

    /// Moves the callback out, leaving the default behind.
    pub fn take(&mut self) -> Self {
        Self(self.0.take())
    }

    pub fn call(&mut self, value: T) {
        if let Some(callback) = &mut self.0 {
            callback(value);
        }
    }
}

impl<T> Default for Handler<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T, F> From<F> for Handler<T>
where
    F: FnMut(T) + Send + Sync + 'static,
{
    fn from(callback: F) -> Self {
        Self(Some(Box::new(callback)))
    }
}

impl<T> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&if self.is_default() { "default" } else { "set" })
            .finish()
    }
}
