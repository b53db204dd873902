pub use self::{block::*, board::*, piece::*, shape::*};

pub(crate) mod block;
pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape;
