pub mod cursor;
pub mod dual;
pub mod view;

/// Which of the two compared documents a cursor or page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}
