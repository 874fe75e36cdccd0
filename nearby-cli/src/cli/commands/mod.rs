pub mod categories;
pub mod classify;
pub mod distance;
pub mod search;

pub use categories::CategoriesCommands;
pub use classify::ClassifyCommands;
pub use distance::DistanceCommands;
pub use search::SearchCommands;
