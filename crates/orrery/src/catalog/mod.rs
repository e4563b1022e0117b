//! Static data: the hand-authored body catalog, generated belts and the
//! record formats of the external small-body feeds.

pub mod belts;
pub mod bodies;
pub mod records;
