pub mod prelude;
pub mod scores;
