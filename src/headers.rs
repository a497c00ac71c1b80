use crate::{
    common::{is_forbidden, Guard, Mode},
    errors::HeadersError,
    handle::HostHandle,
    header::{normalize_name, normalize_value, Header, HeaderName, HeaderValue},
};
use tracing::debug;

mod backend;
mod list;
mod sort_index;

use backend::{Backend, WriteTarget};

mod iter;
pub use iter::{Entries, Keys, Values};

/// A case-insensitive, multi-valued, order-aware header collection.
///
/// Storage lives either in an external host handle (`H`), in a locally
/// owned entry list, or in both; operations move the collection between
/// those modes as needed and never drop data doing so. Reads that need
/// ordering go through a lazily rebuilt sort index, so `get`/`has` are
/// logarithmic once the index is fresh; reads may therefore rebuild state
/// and take `&mut self`.
#[derive(Debug)]
pub struct Headers<H> {
    guard: Guard,
    backend: Backend<H>,
}

impl<H: HostHandle> Headers<H> {
    /// An empty collection; no backing store is allocated until first use.
    pub fn new(guard: Guard) -> Self {
        Self {
            guard,
            backend: Backend::Uninitialized,
        }
    }

    /// Wraps an externally-owned handle.
    pub fn from_handle(handle: H, guard: Guard) -> Self {
        Self {
            guard,
            backend: Backend::HostOnly { handle },
        }
    }

    /// Builds a collection from ordered name/value pairs; each pair goes
    /// through [`append`](Self::append), so validation and guard filtering
    /// apply.
    pub fn from_pairs<I, N, V>(pairs: I, guard: Guard) -> Result<Self, HeadersError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut headers = Self::new(guard);
        for (name, value) in pairs {
            headers.append(name.as_ref(), value.as_ref())?;
        }
        Ok(headers)
    }

    #[inline]
    pub fn guard(&self) -> Guard {
        self.guard
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.backend.mode()
    }

    /// Appends a value, keeping any existing values for the same name.
    pub fn append(&mut self, name: &str, value: &str) -> Result<(), HeadersError> {
        let name = normalize_name(name)?;
        let value = normalize_value(value)?;
        if is_forbidden(self.guard, &name.text) {
            debug!(name = %name.text, guard = %self.guard, "forbidden header, ignoring append");
            return Ok(());
        }

        match self.backend.prepare_for_modification()? {
            WriteTarget::Handle(handle) => handle.append(&name.text, &value.text)?,
            WriteTarget::Content(content) => {
                content.list.push(Header::new(
                    HeaderName::from_cow(name.text),
                    HeaderValue::from_cow(value.text),
                ));
                content.index.invalidate();
            }
        }
        Ok(())
    }

    /// Sets the single value for a name: the first existing entry is
    /// overwritten in place, remaining duplicates are removed, and an
    /// absent name is appended.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), HeadersError> {
        let name = normalize_name(name)?;
        let value = normalize_value(value)?;
        if is_forbidden(self.guard, &name.text) {
            debug!(name = %name.text, guard = %self.guard, "forbidden header, ignoring set");
            return Ok(());
        }

        match self.backend.prepare_for_modification()? {
            WriteTarget::Handle(handle) => handle.set(&name.text, &value.text)?,
            WriteTarget::Content(content) => {
                content.index.ensure_fresh(&content.list);
                match content.index.lookup(&content.list, &name.text) {
                    Some(pos) => {
                        // in-place value rewrite; the index stays valid
                        let idx = content.index.at(pos);
                        content
                            .list
                            .set_value(idx, HeaderValue::from_cow(value.text));
                        while content.index.name_matches(&content.list, pos + 1, &name.text) {
                            content.index.remove_at(&mut content.list, pos + 1);
                        }
                    }
                    None => {
                        content.list.push(Header::new(
                            HeaderName::from_cow(name.text),
                            HeaderValue::from_cow(value.text),
                        ));
                        content.index.invalidate();
                    }
                }
            }
        }
        Ok(())
    }

    /// Appends only when the name is not present yet.
    pub fn set_if_undefined(&mut self, name: &str, value: &str) -> Result<(), HeadersError> {
        let name = normalize_name(name)?;
        let value = normalize_value(value)?;
        if is_forbidden(self.guard, &name.text) {
            debug!(name = %name.text, guard = %self.guard, "forbidden header, ignoring insert");
            return Ok(());
        }

        match self.backend.prepare_for_modification()? {
            WriteTarget::Handle(handle) => {
                if !handle.has(&name.text)? {
                    handle.append(&name.text, &value.text)?;
                }
            }
            WriteTarget::Content(content) => {
                content.index.ensure_fresh(&content.list);
                if content.index.lookup(&content.list, &name.text).is_none() {
                    content.list.push(Header::new(
                        HeaderName::from_cow(name.text),
                        HeaderValue::from_cow(value.text),
                    ));
                    content.index.invalidate();
                }
            }
        }
        Ok(())
    }

    /// The combined value for `name`, or `None` when absent.
    ///
    /// An uninitialized collection answers without allocating a backend.
    pub fn get(&mut self, name: &str) -> Result<Option<String>, HeadersError> {
        let name = normalize_name(name)?;
        if self.backend.mode().is_uninitialized() {
            return Ok(None);
        }

        let content = self.backend.materialize()?;
        content.index.ensure_fresh(&content.list);
        match content.index.lookup(&content.list, &name.text) {
            Some(pos) => {
                let (value, _) = iter::combined_value(&content.list, &content.index, pos);
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Whether any entry matches `name`. A host-backed collection asks the
    /// handle directly, without materializing.
    pub fn has(&mut self, name: &str) -> Result<bool, HeadersError> {
        let name = normalize_name(name)?;
        match &self.backend {
            Backend::Uninitialized => Ok(false),
            Backend::HostOnly { handle } => Ok(handle.has(&name.text)?),
            _ => {
                let content = self.backend.materialize()?;
                content.index.ensure_fresh(&content.list);
                Ok(content.index.lookup(&content.list, &name.text).is_some())
            }
        }
    }

    /// Removes every entry whose name matches `name`.
    pub fn delete(&mut self, name: &str) -> Result<(), HeadersError> {
        let name = normalize_name(name)?;
        if is_forbidden(self.guard, &name.text) {
            debug!(name = %name.text, guard = %self.guard, "forbidden header, ignoring delete");
            return Ok(());
        }

        match self.backend.prepare_for_modification()? {
            WriteTarget::Handle(handle) => handle.remove(&name.text)?,
            WriteTarget::Content(content) => {
                content.index.ensure_fresh(&content.list);
                if let Some(pos) = content.index.lookup(&content.list, &name.text) {
                    // equal names are contiguous in the sorted index; keep
                    // removing at the same sorted position until the name
                    // stops matching
                    while content.index.name_matches(&content.list, pos, &name.text) {
                        content.index.remove_at(&mut content.list, pos);
                    }
                }
            }
        }
        Ok(())
    }

    /// An independent writable handle snapshot of the current entries.
    ///
    /// An uninitialized collection yields a fresh empty handle and stays
    /// uninitialized; a content-only collection first derives a handle
    /// from its entries without discarding them.
    pub fn handle_clone(&mut self) -> Result<H, HeadersError> {
        if self.backend.mode().is_uninitialized() {
            return H::from_entries(&[]).map_err(|_| HeadersError::CloningFailed);
        }
        if self.backend.mode() == Mode::ContentOnly {
            self.backend.cache_in_content()?;
        }

        let handle = self.backend.handle().ok_or(HeadersError::CloningFailed)?;
        handle.try_clone().ok_or(HeadersError::CloningFailed)
    }

    /// Iterates `(name, combined value)` pairs in case-insensitive name
    /// order, names rendered lower-case.
    pub fn entries(&mut self) -> Result<Entries<'_>, HeadersError> {
        let content = self.backend.materialize()?;
        content.index.ensure_fresh(&content.list);
        Ok(Entries::new(&content.list, &content.index))
    }

    /// Iterates names, one step per combined group.
    pub fn keys(&mut self) -> Result<Keys<'_>, HeadersError> {
        let content = self.backend.materialize()?;
        content.index.ensure_fresh(&content.list);
        Ok(Keys::new(&content.list, &content.index))
    }

    /// Iterates combined values.
    pub fn values(&mut self) -> Result<Values<'_>, HeadersError> {
        let content = self.backend.materialize()?;
        content.index.ensure_fresh(&content.list);
        Ok(Values::new(&content.list, &content.index))
    }
}
