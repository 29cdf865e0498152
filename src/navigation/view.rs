// Comparison view: collects the current page of each side and runs the
// diff engine whenever either side or the config changes.

use std::cell::RefCell;
use std::rc::Rc;

use super::Side;
use super::cursor::PageObserver;
use crate::diff::{DiffConfig, difference};
use crate::page::Page;

/// What the presenter should currently show on each side.
#[derive(Debug, Default)]
pub struct ComparisonView {
    config: DiffConfig,
    left: Option<Page>,
    right: Option<Page>,
    shown_left: Option<Page>,
    shown_right: Option<Page>,
}

impl ComparisonView {
    pub fn new(config: DiffConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Wrap the view for sharing between the two cursors' observers.
    pub fn shared(config: DiffConfig) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(config)))
    }

    /// Observer that forwards one side's page changes into `view`.
    pub fn observer(view: &Rc<RefCell<Self>>, side: Side) -> SideObserver {
        SideObserver {
            view: Rc::clone(view),
            side,
        }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Replace the diff configuration and refresh the shown pages.
    pub fn set_config(&mut self, config: DiffConfig) {
        self.config = config;
        self.update_view();
    }

    pub fn update(&mut self, side: Side, page: Page) {
        match side {
            Side::Left => self.left = Some(page),
            Side::Right => self.right = Some(page),
        }
        self.update_view();
    }

    pub fn shown(&self, side: Side) -> Option<&Page> {
        match side {
            Side::Left => self.shown_left.as_ref(),
            Side::Right => self.shown_right.as_ref(),
        }
    }

    fn update_view(&mut self) {
        match (&self.left, &self.right) {
            (None, None) => {}
            (Some(left), None) => self.shown_left = Some(left.clone()),
            (None, Some(right)) => self.shown_right = Some(right.clone()),
            (Some(left), Some(right)) => {
                let result = difference(left, right, &self.config);
                self.shown_left = Some(result.left);
                self.shown_right = Some(result.right);
            }
        }
    }
}

/// [`PageObserver`] feeding one side of a shared [`ComparisonView`].
pub struct SideObserver {
    view: Rc<RefCell<ComparisonView>>,
    side: Side,
}

impl PageObserver for SideObserver {
    fn page_changed(&mut self, _index: u32, page: &Page) {
        self.view.borrow_mut().update(self.side, page.clone());
    }
}
