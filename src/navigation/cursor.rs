// Page cursor: clamped 1-based position in one page source.

use tracing::{debug, warn};

use crate::page::Page;
use crate::source::PageSource;

/// Receives the page shown after every successful navigation.
pub trait PageObserver {
    fn page_changed(&mut self, index: u32, page: &Page);
}

impl<F> PageObserver for F
where
    F: FnMut(u32, &Page),
{
    fn page_changed(&mut self, index: u32, page: &Page) {
        self(index, page)
    }
}

/// Current page of one side.
///
/// `index` is 0 until the cursor has been positioned and `total` is 0 until
/// a source is attached. Every navigation call on an unloaded cursor is a
/// no-op.
#[derive(Default)]
pub struct PageCursor {
    index: u32,
    total: u32,
    source: Option<Box<dyn PageSource>>,
    observer: Option<Box<dyn PageObserver>>,
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the observer notified on every page change, replacing any
    /// previous one.
    pub fn subscribe(&mut self, observer: impl PageObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Attach a page source, replacing the previous one.
    ///
    /// The cursor is left unpositioned (`index == 0`); call
    /// [`go_first`](Self::go_first) to show the first page.
    pub fn load(&mut self, source: Box<dyn PageSource>) {
        self.total = source.total();
        self.index = 0;
        self.source = Some(source);
        debug!(total = self.total, "cursor loaded");
    }

    pub fn is_loaded(&self) -> bool {
        self.total > 0
    }

    /// Current 1-based page index, or 0 when unpositioned.
    pub fn current_index(&self) -> u32 {
        self.index
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.source.as_ref()?.get_page(self.index)
    }

    pub fn go_first(&mut self) {
        if !self.is_loaded() {
            return;
        }
        self.move_to(1);
    }

    pub fn go_last(&mut self) {
        if !self.is_loaded() {
            return;
        }
        self.move_to(self.total);
    }

    pub fn go_prev(&mut self) {
        if !self.is_loaded() {
            return;
        }
        self.move_to(self.clamp(self.index as i64 - 1));
    }

    pub fn go_next(&mut self) {
        if !self.is_loaded() {
            return;
        }
        self.move_to(self.clamp(self.index as i64 + 1));
    }

    /// Jump to page `n`, clamped to `1..=total`.
    pub fn go_to(&mut self, n: i64) {
        if !self.is_loaded() {
            return;
        }
        self.move_to(self.clamp(n));
    }

    fn clamp(&self, n: i64) -> u32 {
        n.clamp(1, self.total as i64) as u32
    }

    fn move_to(&mut self, index: u32) {
        self.index = index;

        let Some(observer) = self.observer.as_mut() else {
            return;
        };
        match self.source.as_ref().and_then(|s| s.get_page(index)) {
            Some(page) => observer.page_changed(index, page),
            None => warn!(index, "page not available, was the source loaded?"),
        }
    }
}

impl std::fmt::Debug for PageCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCursor")
            .field("index", &self.index)
            .field("total", &self.total)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}
