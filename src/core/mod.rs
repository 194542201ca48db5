pub mod data_set;
pub mod date_key;
pub mod primitives;
pub mod store;
pub mod types;
pub mod windowing;

pub use data_set::{DatasetSource, DateDataset};
pub use date_key::{CalendarDay, DateKey, DateKeyFormat, DateKeyFormatter};
pub use store::DateDataStore;
pub use types::{ChartRow, Observation, chart_rows};
pub use windowing::dates_in_window;
