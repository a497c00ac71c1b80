use crate::header::cmp_ignore_ascii_case;
use once_cell::sync::OnceCell;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

static GUARD_NAME: [&str; 3] = ["none", "request", "response"];

/// Mutation policy of a collection, fixed at construction time.
///
/// `Request` and `Response` collections silently ignore mutations of the
/// names the corresponding forbidden table lists; `None` forbids nothing.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Default)]
#[non_exhaustive]
pub enum Guard {
    #[default]
    None = 0,
    Request = 1,
    Response = 2,
}

impl Guard {
    #[inline]
    pub fn as_str(self) -> &'static str {
        unsafe { GUARD_NAME.get_unchecked(self as usize) }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::None
    }

    #[inline]
    pub fn is_request(self) -> bool {
        self == Self::Request
    }

    #[inline]
    pub fn is_response(self) -> bool {
        self == Self::Response
    }
}

impl Display for Guard {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A set of header names sorted with the engine's case-insensitive
/// comparator, so membership is a binary search.
#[derive(Debug, Default, Clone)]
pub struct ForbiddenNames {
    names: Vec<Box<str>>,
}

impl ForbiddenNames {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        let mut names: Vec<Box<str>> = names.into_iter().map(Into::into).collect();
        names.sort_by(|a, b| cmp_ignore_ascii_case(a.as_bytes(), b.as_bytes()));
        names.dedup_by(|a, b| cmp_ignore_ascii_case(a.as_bytes(), b.as_bytes()) == Ordering::Equal);
        Self { names }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names
            .binary_search_by(|probe| cmp_ignore_ascii_case(probe.as_bytes(), name.as_bytes()))
            .is_ok()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(AsRef::as_ref)
    }
}

static FORBIDDEN_REQUEST: OnceCell<ForbiddenNames> = OnceCell::new();
static FORBIDDEN_RESPONSE: OnceCell<ForbiddenNames> = OnceCell::new();

/// Install the process-wide forbidden request/response header name sets.
///
/// The surrounding environment calls this once, before any guarded
/// collection is used; the first installation wins and later calls return
/// `false`. Until installed, every guard forbids nothing.
pub fn install_forbidden_names<I, J, S, T>(request: I, response: J) -> bool
where
    I: IntoIterator<Item = S>,
    S: Into<Box<str>>,
    J: IntoIterator<Item = T>,
    T: Into<Box<str>>,
{
    let req = FORBIDDEN_REQUEST
        .set(ForbiddenNames::from_names(request))
        .is_ok();
    let res = FORBIDDEN_RESPONSE
        .set(ForbiddenNames::from_names(response))
        .is_ok();
    req && res
}

pub(crate) fn forbidden_names(guard: Guard) -> Option<&'static ForbiddenNames> {
    match guard {
        Guard::None => None,
        Guard::Request => FORBIDDEN_REQUEST.get(),
        Guard::Response => FORBIDDEN_RESPONSE.get(),
    }
}

#[inline]
pub(crate) fn is_forbidden(guard: Guard, name: &str) -> bool {
    forbidden_names(guard).map_or(false, |t| t.contains(name))
}

/// Install a fixed pair of tables for tests, first caller wins; every
/// guard-sensitive test goes through this so test order does not matter.
#[cfg(test)]
pub(crate) fn install_test_tables() {
    FORBIDDEN_REQUEST.get_or_init(|| ForbiddenNames::from_names(["host", "keep-alive", "via"]));
    FORBIDDEN_RESPONSE.get_or_init(|| ForbiddenNames::from_names(["set-cookie", "set-cookie2"]));
}
