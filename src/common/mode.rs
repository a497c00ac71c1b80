use std::fmt::{Display, Formatter};

static MODE_NAME: [&str; 4] = [
    "uninitialized",
    "host-only",
    "content-only",
    "cached-in-content",
];

/// The storage backend state of a [`Headers`](crate::Headers) collection.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Default)]
#[non_exhaustive]
pub enum Mode {
    #[default]
    Uninitialized = 0,
    HostOnly = 1,
    ContentOnly = 2,
    CachedInContent = 3,
}

impl Mode {
    #[inline]
    pub fn as_str(self) -> &'static str {
        unsafe { MODE_NAME.get_unchecked(self as usize) }
    }

    #[inline]
    pub fn is_uninitialized(self) -> bool {
        self == Self::Uninitialized
    }

    /// An external handle is retained in this mode.
    #[inline]
    pub fn has_handle(self) -> bool {
        self == Self::HostOnly || self == Self::CachedInContent
    }

    /// A local entry list is allocated in this mode.
    #[inline]
    pub fn has_content(self) -> bool {
        self == Self::ContentOnly || self == Self::CachedInContent
    }
}

impl Display for Mode {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
