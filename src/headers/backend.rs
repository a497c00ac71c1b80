use super::{list::HeaderList, sort_index::SortIndex};
use crate::{common::Mode, errors::HeadersError, handle::HostHandle};
use std::mem;
use tracing::{debug, trace};

/// The locally-owned half of the storage: entry list plus its sort index.
#[derive(Debug, Default)]
pub(crate) struct Content {
    pub(crate) list: HeaderList,
    pub(crate) index: SortIndex,
}

/// The storage backend state machine. Each state carries exactly the
/// fields that exist in it: no handle is reachable while content-only, no
/// list while host-only.
#[derive(Debug)]
pub(crate) enum Backend<H> {
    Uninitialized,
    HostOnly { handle: H },
    ContentOnly { content: Content },
    CachedInContent { handle: H, content: Content },
}

/// Where a mutation goes after [`Backend::prepare_for_modification`]: a
/// writable external handle, or the local content.
#[derive(Debug)]
pub(crate) enum WriteTarget<'b, H> {
    Handle(&'b mut H),
    Content(&'b mut Content),
}

impl<H> Default for Backend<H> {
    #[inline]
    fn default() -> Self {
        Backend::Uninitialized
    }
}

impl<H: HostHandle> Backend<H> {
    pub(crate) fn mode(&self) -> Mode {
        match self {
            Backend::Uninitialized => Mode::Uninitialized,
            Backend::HostOnly { .. } => Mode::HostOnly,
            Backend::ContentOnly { .. } => Mode::ContentOnly,
            Backend::CachedInContent { .. } => Mode::CachedInContent,
        }
    }

    pub(crate) fn handle(&self) -> Option<&H> {
        match self {
            Backend::HostOnly { handle } | Backend::CachedInContent { handle, .. } => Some(handle),
            _ => None,
        }
    }

    /// Brings all entries into local content, retaining the handle if one
    /// exists: `Uninitialized -> ContentOnly`, `HostOnly -> CachedInContent`,
    /// content-backed modes unchanged. Nothing changes if the handle read
    /// fails.
    pub(crate) fn materialize(&mut self) -> Result<&mut Content, HeadersError> {
        let host_entries = match &*self {
            Backend::HostOnly { handle } => Some(handle.entries()?),
            _ => None,
        };

        if let Some(entries) = host_entries {
            trace!(entries = entries.len(), "backend: host-only -> cached-in-content");
            let mut content = Content::default();
            for entry in entries {
                content.list.push(entry);
            }
            let prev = mem::take(self);
            *self = match prev {
                Backend::HostOnly { handle } => Backend::CachedInContent { handle, content },
                keep => keep,
            };
        } else if matches!(self, Backend::Uninitialized) {
            trace!("backend: uninitialized -> content-only");
            *self = Backend::ContentOnly {
                content: Content::default(),
            };
        }

        match self {
            Backend::ContentOnly { content } | Backend::CachedInContent { content, .. } => {
                Ok(content)
            }
            Backend::Uninitialized | Backend::HostOnly { .. } => {
                unreachable!("backend materialized")
            }
        }
    }

    /// `ContentOnly -> CachedInContent`: builds a fresh handle from the
    /// current entries, keeping the list. Other modes unchanged.
    pub(crate) fn cache_in_content(&mut self) -> Result<(), HeadersError> {
        if let Backend::ContentOnly { content } = &*self {
            let handle = H::from_entries(content.list.as_slice())
                .map_err(|_| HeadersError::CloningFailed)?;
            trace!(
                entries = content.list.len(),
                "backend: content-only -> cached-in-content"
            );
            let prev = mem::take(self);
            *self = match prev {
                Backend::ContentOnly { content } => Backend::CachedInContent { handle, content },
                keep => keep,
            };
        }
        Ok(())
    }

    /// `CachedInContent -> ContentOnly`: releases the handle, keeping the
    /// list. Other modes unchanged.
    pub(crate) fn release_handle(&mut self) {
        if matches!(self, Backend::CachedInContent { .. }) {
            trace!("backend: cached-in-content -> content-only");
            let prev = mem::take(self);
            *self = match prev {
                Backend::CachedInContent { content, .. } => Backend::ContentOnly { content },
                keep => keep,
            };
        }
    }

    /// Routes an upcoming mutation: host-only stores are cloned first when
    /// shared (so mutating this collection never mutates a handle another
    /// owner observes); cached and uninitialized stores settle into
    /// content-only.
    pub(crate) fn prepare_for_modification(
        &mut self,
    ) -> Result<WriteTarget<'_, H>, HeadersError> {
        match self {
            Backend::HostOnly { handle } => {
                if !handle.is_writable() {
                    debug!("cloning shared headers handle before write");
                    let cloned = handle.try_clone().ok_or(HeadersError::CloningFailed)?;
                    *handle = cloned;
                }
            }
            Backend::Uninitialized => {
                self.materialize()?;
            }
            Backend::CachedInContent { .. } => self.release_handle(),
            Backend::ContentOnly { .. } => {}
        }

        match self {
            Backend::HostOnly { handle } => Ok(WriteTarget::Handle(handle)),
            Backend::ContentOnly { content } => Ok(WriteTarget::Content(content)),
            Backend::Uninitialized | Backend::CachedInContent { .. } => {
                unreachable!("backend prepared for modification")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::HttpMapHandle;

    fn host_backend(pairs: &[(&str, &str)], writable: bool) -> Backend<HttpMapHandle> {
        let mut handle = HttpMapHandle::new();
        for (name, value) in pairs {
            handle.append(name, value).unwrap();
        }
        let handle = if writable {
            handle
        } else {
            HttpMapHandle::read_only(handle.into_map())
        };
        Backend::HostOnly { handle }
    }

    #[test]
    fn test_materialize_uninitialized() {
        let mut backend: Backend<HttpMapHandle> = Backend::Uninitialized;
        let content = backend.materialize().unwrap();
        assert!(content.list.is_empty());
        assert_eq!(backend.mode(), Mode::ContentOnly);
    }

    #[test]
    fn test_materialize_host_retains_handle_and_order() {
        let mut backend = host_backend(&[("b", "2"), ("a", "1"), ("b", "3")], true);

        let content = backend.materialize().unwrap();
        assert_eq!(content.list.len(), 3);
        let values = content.list.as_slice();
        // same-named entries keep the handle's order
        let b: Vec<&str> = values
            .iter()
            .filter(|h| h.name == "b")
            .map(|h| h.value.as_str())
            .collect();
        assert_eq!(b, vec!["2", "3"]);

        assert_eq!(backend.mode(), Mode::CachedInContent);
        assert!(backend.handle().is_some());

        // materializing again is a no-op
        backend.materialize().unwrap();
        assert_eq!(backend.mode(), Mode::CachedInContent);
    }

    #[test]
    fn test_cache_and_release() {
        let mut backend: Backend<HttpMapHandle> = Backend::Uninitialized;
        backend.materialize().unwrap();
        backend.cache_in_content().unwrap();
        assert_eq!(backend.mode(), Mode::CachedInContent);

        backend.release_handle();
        assert_eq!(backend.mode(), Mode::ContentOnly);

        // release outside cached-in-content does nothing
        backend.release_handle();
        assert_eq!(backend.mode(), Mode::ContentOnly);
    }

    #[test]
    fn test_prepare_clones_shared_handle() {
        let mut backend = host_backend(&[("a", "1")], false);
        assert!(!backend.handle().unwrap().is_writable());

        match backend.prepare_for_modification().unwrap() {
            WriteTarget::Handle(handle) => assert!(handle.is_writable()),
            WriteTarget::Content(_) => panic!("expected a host write target"),
        }
        assert_eq!(backend.mode(), Mode::HostOnly);
    }

    #[test]
    fn test_prepare_settles_into_content() {
        let mut backend: Backend<HttpMapHandle> = Backend::Uninitialized;
        assert!(matches!(
            backend.prepare_for_modification().unwrap(),
            WriteTarget::Content(_)
        ));
        assert_eq!(backend.mode(), Mode::ContentOnly);

        backend.cache_in_content().unwrap();
        assert!(matches!(
            backend.prepare_for_modification().unwrap(),
            WriteTarget::Content(_)
        ));
        assert_eq!(backend.mode(), Mode::ContentOnly);
    }
}
