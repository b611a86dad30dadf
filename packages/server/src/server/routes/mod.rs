// HTTP routes
pub mod health;
pub mod history;
pub mod search;

pub use health::*;
pub use history::*;
pub use search::*;
