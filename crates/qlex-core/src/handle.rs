//! `Handle<T>`: a shared, optionally-empty reference to a value.
//!
//! Forecast and discount curves are passed around as handles so that an
//! "unset curve" is a representable state, distinct from a missing argument.
//! `T` may be unsized, so `Handle<dyn YieldTermStructure>` works.

use std::sync::Arc;

/// A shared, optionally-null reference to a value of type `T`.
pub struct Handle<T: ?Sized> {
    inner: Option<Arc<T>>,
}

impl<T> Handle<T> {
    /// Create a non-null handle wrapping `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Some(Arc::new(value)),
        }
    }
}

impl<T: ?Sized> Handle<T> {
    /// Create a handle from an existing `Arc`.
    pub fn from_arc(arc: Arc<T>) -> Self {
        Self { inner: Some(arc) }
    }

    /// Create a null (empty) handle.
    pub fn null() -> Self {
        Self { inner: None }
    }

    /// Return `true` if the handle is null (contains no value).
    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Return a reference to the inner `Arc<T>`, or `None` if this handle is
    /// null.
    pub fn as_arc(&self) -> Option<&Arc<T>> {
        self.inner.as_ref()
    }

    /// Attempt to borrow the contained value.
    pub fn get(&self) -> Option<&T> {
        self.inner.as_deref()
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> Default for Handle<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> From<Arc<T>> for Handle<T> {
    fn from(arc: Arc<T>) -> Self {
        Self::from_arc(arc)
    }
}

impl<T: ?Sized> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            Some(_) => write!(f, "Handle(linked)"),
            None => write!(f, "Handle(null)"),
        }
    }
}
