//! Locations and the history collaborators that read and change them

use std::cell::RefCell;
use std::fmt;

/// The parts of a URL the bindings care about.
///
/// `search` keeps its leading `?` and `hash` its leading `#`; both are empty
/// when the URL has no such component.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl Location {
    /// Split a path-relative URL such as `/list?page=2#top`.
    pub fn parse(url: &str) -> Self {
        let (rest, hash) = match url.find('#') {
            Some(i) => (&url[..i], &url[i..]),
            None => (url, ""),
        };
        let (pathname, search) = match rest.find('?') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };
        Self {
            pathname: pathname.to_string(),
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    /// The same location with its query replaced by `query` (no leading `?`).
    pub fn with_query(&self, query: &str) -> Self {
        Self {
            pathname: self.pathname.clone(),
            search: if query.is_empty() {
                String::new()
            } else {
                format!("?{}", query)
            },
            hash: self.hash.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// Performs URL transitions.
pub trait Navigator {
    /// Add a history entry for `location`.
    fn push(&self, location: &Location);
    /// Overwrite the current history entry with `location`.
    fn replace(&self, location: &Location);
}

/// Reports the current location.
pub trait LocationSource {
    fn location(&self) -> Location;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationKind {
    Push,
    Replace,
}

/// In-memory history stack.
///
/// Used for tests and for hosts without a browser history. Every navigation is
/// also appended to a log so callers can count transitions.
#[derive(Debug)]
pub struct MemoryHistory {
    inner: RefCell<MemoryHistoryInner>,
}

#[derive(Debug)]
struct MemoryHistoryInner {
    entries: Vec<Location>,
    index: usize,
    log: Vec<(NavigationKind, Location)>,
}

impl MemoryHistory {
    pub fn new(initial_url: &str) -> Self {
        Self {
            inner: RefCell::new(MemoryHistoryInner {
                entries: vec![Location::parse(initial_url)],
                index: 0,
                log: Vec::new(),
            }),
        }
    }

    /// Number of entries in the stack.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Always false: the stack starts with the initial entry and never
    /// shrinks below it.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Step back one entry. Returns false at the start of the stack.
    pub fn back(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.index == 0 {
            return false;
        }
        inner.index -= 1;
        true
    }

    /// Step forward one entry. Returns false at the end of the stack.
    pub fn forward(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.index + 1 >= inner.entries.len() {
            return false;
        }
        inner.index += 1;
        true
    }

    /// All navigations performed so far, oldest first.
    pub fn navigations(&self) -> Vec<(NavigationKind, Location)> {
        self.inner.borrow().log.clone()
    }
}

impl Navigator for MemoryHistory {
    fn push(&self, location: &Location) {
        let mut inner = self.inner.borrow_mut();
        // Pushing discards any forward entries
        let keep = inner.index + 1;
        inner.entries.truncate(keep);
        inner.entries.push(location.clone());
        inner.index = keep;
        inner.log.push((NavigationKind::Push, location.clone()));
    }

    fn replace(&self, location: &Location) {
        let mut inner = self.inner.borrow_mut();
        let index = inner.index;
        inner.entries[index] = location.clone();
        inner.log.push((NavigationKind::Replace, location.clone()));
    }
}

impl LocationSource for MemoryHistory {
    fn location(&self) -> Location {
        let inner = self.inner.borrow();
        inner.entries[inner.index].clone()
    }
}
