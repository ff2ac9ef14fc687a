pub mod location;
pub mod segment;
pub mod trip;

pub use location::{LocationField, LocationParts};
pub use segment::{RawSegmentRow, SegmentRecord};
pub use trip::TripRecord;
