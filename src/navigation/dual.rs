// Two page cursors driven independently or together.

use tracing::debug;

use super::Side;
use super::cursor::PageCursor;

/// Navigation mode currently available on a [`DualPageNavigator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// At most one side is loaded; only that side can move.
    Independent,
    /// Both sides are loaded; synchronized calls move both.
    Synchronized,
}

/// Owns the left and right cursors and offers synchronized navigation.
///
/// Each cursor clamps on its own, so when the two documents have different
/// page counts synchronized stepping lets the displayed page numbers drift
/// apart. That drift is intended.
#[derive(Debug, Default)]
pub struct DualPageNavigator {
    left: PageCursor,
    right: PageCursor,
}

impl DualPageNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursors(left: PageCursor, right: PageCursor) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &PageCursor {
        &self.left
    }

    pub fn right(&self) -> &PageCursor {
        &self.right
    }

    pub fn left_mut(&mut self) -> &mut PageCursor {
        &mut self.left
    }

    pub fn right_mut(&mut self) -> &mut PageCursor {
        &mut self.right
    }

    pub fn cursor(&self, side: Side) -> &PageCursor {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn cursor_mut(&mut self, side: Side) -> &mut PageCursor {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn mode(&self) -> NavigationMode {
        if self.left.is_loaded() && self.right.is_loaded() {
            NavigationMode::Synchronized
        } else {
            NavigationMode::Independent
        }
    }

    pub fn is_synchronized(&self) -> bool {
        self.mode() == NavigationMode::Synchronized
    }

    pub fn go_first(&mut self) {
        self.both(PageCursor::go_first);
    }

    pub fn go_last(&mut self) {
        self.both(PageCursor::go_last);
    }

    pub fn go_prev(&mut self) {
        self.both(PageCursor::go_prev);
    }

    pub fn go_next(&mut self) {
        self.both(PageCursor::go_next);
    }

    pub fn go_to(&mut self, n: i64) {
        self.both(|cursor| cursor.go_to(n));
    }

    fn both(&mut self, mut op: impl FnMut(&mut PageCursor)) {
        if !self.is_synchronized() {
            debug!("synchronized navigation needs both sides loaded");
            return;
        }
        op(&mut self.left);
        op(&mut self.right);
    }
}
