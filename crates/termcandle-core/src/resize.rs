// File: crates/termcandle-core/src/resize.rs
// Summary: Resize controller; size providers, change detection and ordered subscriber lists.

use std::io;

use log::debug;

use crate::bar::Bar;
use crate::chart::Chart;
use crate::types::TermSize;

pub type ResizeCallback = dyn FnMut(TermSize) + Send;
pub type BeforeRenderCallback = dyn FnMut(&mut Vec<Bar>) + Send;

/// Handle returned on subscription, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Callbacks invoked synchronously in registration order.
pub struct Subscribers<F: ?Sized> {
    next_id: u64,
    entries: Vec<(SubscriberId, Box<F>)>,
}

impl<F: ?Sized> Subscribers<F> {
    pub fn new() -> Self {
        Self { next_id: 0, entries: Vec::new() }
    }

    pub fn subscribe(&mut self, callback: Box<F>) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<F>> {
        self.entries.iter_mut().map(|(_, cb)| cb)
    }
}

impl<F: ?Sized> Default for Subscribers<F> {
    fn default() -> Self { Self::new() }
}

impl<F: ?Sized> std::fmt::Debug for Subscribers<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers").field("len", &self.entries.len()).finish()
    }
}

/// Source of the current terminal size.
pub trait SizeProvider {
    fn size(&mut self) -> io::Result<TermSize>;
}

/// A fixed size, e.g. when output is not a terminal.
impl SizeProvider for TermSize {
    fn size(&mut self) -> io::Result<TermSize> { Ok(*self) }
}

impl<F> SizeProvider for F
where
    F: FnMut() -> io::Result<TermSize>,
{
    fn size(&mut self) -> io::Result<TermSize> { self() }
}

/// Polls a provider and reports sizes that differ from the last one seen.
#[derive(Debug)]
pub struct ResizeWatcher<P> {
    provider: P,
    last: Option<TermSize>,
}

impl<P: SizeProvider> ResizeWatcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, last: None }
    }

    pub fn last(&self) -> Option<TermSize> { self.last }

    /// `Some(size)` on the first poll and whenever the size changed since the previous one.
    pub fn poll(&mut self) -> io::Result<Option<TermSize>> {
        let size = self.provider.size()?;
        if self.last == Some(size) {
            return Ok(None);
        }
        debug!("resize: {:?} -> {}x{}", self.last, size.cols, size.rows);
        self.last = Some(size);
        Ok(Some(size))
    }

    /// Poll and forward a change to `chart`. Returns whether the size changed.
    pub fn poll_into(&mut self, chart: &mut Chart) -> io::Result<bool> {
        match self.poll()? {
            Some(size) => {
                chart.handle_resize(size);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
