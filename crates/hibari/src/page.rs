use std::collections::VecDeque;

use serde::de::DeserializeOwned;

use crate::client::MalClient;
use crate::error::Error;
use crate::request::QuerySpec;

/// One batch of listing results plus pagination cursors.
///
/// Built once per HTTP response and immutable afterwards. Cursors are the
/// complete page URLs the API returned.
#[derive(Debug)]
pub struct Page<T> {
    items: Vec<T>,
    previous: Option<String>,
    next: Option<String>,
}

impl<T> Page<T> {
    pub(crate) fn new(items: Vec<T>, previous: Option<String>, next: Option<String>) -> Self {
        Self {
            items,
            previous,
            next,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            previous: self.previous,
            next: self.next,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<T>, Option<String>) {
        (self.items, self.next)
    }
}

/// Conversion from a listing's wire element to the element a sequence
/// yields. Search listings wrap entities in a `node` envelope; rankings and
/// user lists carry their wrapper through unchanged.
pub trait PageEntity: Sized {
    type Wire: DeserializeOwned;

    fn from_wire(wire: Self::Wire) -> Self;
}

/// Lazy, forward-only sequence over a paginated listing.
///
/// The sequence buffers the current page's items. Advancing past the end
/// issues exactly one request for the next cursor, if present; with no next
/// cursor the sequence terminates. It is not restartable — re-running the
/// originating query creates an independent sequence from the beginning.
///
/// A failed page request surfaces at the advance that needed it; items
/// already yielded stay valid.
pub struct PagedResults<'a, T: PageEntity> {
    client: &'a MalClient,
    spec: QuerySpec,
    items: VecDeque<T>,
    next: Option<String>,
}

impl<'a, T: PageEntity> PagedResults<'a, T> {
    pub(crate) fn new(client: &'a MalClient, spec: QuerySpec, page: Page<T::Wire>) -> Self {
        let (items, next) = page.map(T::from_wire).into_parts();
        Self {
            client,
            spec,
            items: items.into(),
            next,
        }
    }

    /// Advance the sequence, fetching the next page when the buffer is
    /// exhausted.
    pub async fn try_next(&mut self) -> Result<Option<T>, Error> {
        loop {
            if let Some(item) = self.items.pop_front() {
                return Ok(Some(item));
            }
            let Some(next) = self.next.take() else {
                return Ok(None);
            };
            tracing::debug!(cursor = %next, "following next page cursor");
            let mut spec = self.spec.clone();
            spec.set_cursor(next);
            let page = self.client.fetch_page::<T::Wire>(&spec).await?;
            let (items, next) = page.map(T::from_wire).into_parts();
            self.items = items.into();
            self.next = next;
        }
    }

    /// Whether a further page is known to exist beyond the current buffer.
    pub fn has_next_page(&self) -> bool {
        self.next.is_some()
    }

    /// Drain the remaining items into a vector, following every next
    /// cursor. Finite only if the server eventually omits one.
    pub async fn try_collect(mut self) -> Result<Vec<T>, Error> {
        let mut out = Vec::with_capacity(self.items.len());
        while let Some(item) = self.try_next().await? {
            out.push(item);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_map_preserves_cursors() {
        let page = Page::new(vec![1, 2, 3], Some("prev".into()), Some("next".into()));
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.items(), &[2, 4, 6]);
        assert_eq!(mapped.previous(), Some("prev"));
        assert_eq!(mapped.next(), Some("next"));
    }

    #[test]
    fn test_page_accessors() {
        let page: Page<u32> = Page::new(vec![], None, None);
        assert!(page.items().is_empty());
        assert!(page.previous().is_none());
        assert!(page.next().is_none());
    }
}
