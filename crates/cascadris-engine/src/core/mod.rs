pub use self::{board::*, cell::*, collision::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod collision;
pub(crate) mod piece;
pub(crate) mod shape;
