use crate::{
    common::{forbidden_names, Guard},
    errors::HandleError,
    header::{Header, HeaderValue},
};

mod http_map;
pub use http_map::*;

/// The externally-owned header store a [`Headers`](crate::Headers)
/// collection can wrap; the engine's only dependency on the surrounding
/// runtime.
pub trait HostHandle: Sized {
    /// Raw existence check; usable without materializing the collection.
    fn has(&self, name: &str) -> Result<bool, HandleError>;

    /// All values stored for `name`, in the handle's own order.
    fn get(&self, name: &str) -> Result<Option<Vec<HeaderValue>>, HandleError>;

    /// Only callable on a writable handle.
    fn set(&mut self, name: &str, value: &str) -> Result<(), HandleError>;

    /// Only callable on a writable handle.
    fn append(&mut self, name: &str, value: &str) -> Result<(), HandleError>;

    /// Removes every value stored for `name`. Only callable on a writable
    /// handle.
    fn remove(&mut self, name: &str) -> Result<(), HandleError>;

    /// Snapshot of all pairs, in the handle's own order.
    fn entries(&self) -> Result<Vec<Header>, HandleError>;

    /// Whether the handle may be written without cloning it first.
    fn is_writable(&self) -> bool;

    /// An independent, writable copy; `None` when the handle cannot be
    /// cloned.
    fn try_clone(&self) -> Option<Self>;

    /// A fresh, writable handle seeded from the given entries.
    fn from_entries(entries: &[Header]) -> Result<Self, HandleError>;
}

/// Removes from `handle` every name the given guard forbids; used when
/// adopting a foreign handle into a guarded collection.
pub fn strip_forbidden<H: HostHandle>(handle: &mut H, guard: Guard) -> Result<(), HandleError> {
    let Some(names) = forbidden_names(guard) else {
        return Ok(());
    };

    for name in names.iter() {
        if handle.has(name)? {
            handle.remove(name)?;
        }
    }
    Ok(())
}
