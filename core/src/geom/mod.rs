pub mod circle;
pub mod round;

pub use circle::circle_ring;
pub use round::{correct_drift, decimal_places, format_num};
