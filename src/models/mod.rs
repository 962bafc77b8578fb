pub mod loaders;
pub mod restaurant;

pub use loaders::load_records;
pub use restaurant::{Restaurant, ResultRecord, ScoredRestaurant};
