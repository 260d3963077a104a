pub mod binner;
pub mod chart;
pub mod table;

pub use binner::{Bucket, Strategy};
pub use chart::{Chart, Order, SortBy};
pub use table::{RAW_HEADERS, render_raw_table};
