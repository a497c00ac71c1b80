use crate::{
    errors::HandleError,
    header::{Header, HeaderName, HeaderValue},
};

use super::HostHandle;
use http::HeaderMap;

/// A host handle backed by an [`http::HeaderMap`], for embedders whose
/// surrounding runtime already speaks the `http` types.
///
/// A handle constructed as [`read_only`](Self::read_only) models a store
/// shared with another owner: the engine clones it before the first write.
#[derive(Debug, Clone)]
pub struct HttpMapHandle {
    map: HeaderMap,
    writable: bool,
}

impl HttpMapHandle {
    #[inline]
    pub fn new() -> Self {
        Self {
            map: HeaderMap::new(),
            writable: true,
        }
    }

    #[inline]
    pub fn writable(map: HeaderMap) -> Self {
        Self { map, writable: true }
    }

    #[inline]
    pub fn read_only(map: HeaderMap) -> Self {
        Self {
            map,
            writable: false,
        }
    }

    #[inline]
    pub fn as_map(&self) -> &HeaderMap {
        &self.map
    }

    #[inline]
    pub fn into_map(self) -> HeaderMap {
        self.map
    }

    fn parse_name(name: &str) -> Result<http::header::HeaderName, HandleError> {
        http::header::HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| HandleError::new(e.to_string()))
    }

    fn parse_value(value: &str) -> Result<http::header::HeaderValue, HandleError> {
        http::header::HeaderValue::from_bytes(value.as_bytes())
            .map_err(|e| HandleError::new(e.to_string()))
    }

    #[inline]
    fn check_writable(&self) -> Result<(), HandleError> {
        if self.writable {
            Ok(())
        } else {
            Err(HandleError::new("handle is not writable"))
        }
    }
}

impl Default for HttpMapHandle {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl HostHandle for HttpMapHandle {
    fn has(&self, name: &str) -> Result<bool, HandleError> {
        Ok(self.map.contains_key(name))
    }

    fn get(&self, name: &str) -> Result<Option<Vec<HeaderValue>>, HandleError> {
        let mut values = Vec::new();
        for value in self.map.get_all(name) {
            let value = value
                .to_str()
                .map_err(|e| HandleError::new(e.to_string()))?;
            values.push(HeaderValue::new(value));
        }
        Ok(if values.is_empty() { None } else { Some(values) })
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), HandleError> {
        self.check_writable()?;
        let name = Self::parse_name(name)?;
        let value = Self::parse_value(value)?;
        self.map.insert(name, value);
        Ok(())
    }

    fn append(&mut self, name: &str, value: &str) -> Result<(), HandleError> {
        self.check_writable()?;
        let name = Self::parse_name(name)?;
        let value = Self::parse_value(value)?;
        self.map.append(name, value);
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), HandleError> {
        self.check_writable()?;
        self.map.remove(name);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<Header>, HandleError> {
        let mut entries = Vec::with_capacity(self.map.len());
        for (name, value) in self.map.iter() {
            let value = value
                .to_str()
                .map_err(|e| HandleError::new(e.to_string()))?;
            entries.push(Header::new(
                HeaderName::new(name.as_str()),
                HeaderValue::new(value),
            ));
        }
        Ok(entries)
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.writable
    }

    fn try_clone(&self) -> Option<Self> {
        Some(Self {
            map: self.map.clone(),
            writable: true,
        })
    }

    fn from_entries(entries: &[Header]) -> Result<Self, HandleError> {
        let mut map = HeaderMap::with_capacity(entries.len());
        for entry in entries {
            let name = Self::parse_name(entry.name.as_str())?;
            let value = http::header::HeaderValue::from_bytes(entry.value.as_bytes())
                .map_err(|e| HandleError::new(e.to_string()))?;
            map.append(name, value);
        }
        Ok(Self {
            map,
            writable: true,
        })
    }
}
