pub mod errors;
pub mod game;
pub mod score;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use score::*;
