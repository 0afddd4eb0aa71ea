pub mod item;

pub use item::{parse_item_id, Item};
