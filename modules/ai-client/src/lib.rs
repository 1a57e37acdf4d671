pub mod claude;

pub use claude::{Claude, GenerateOptions};
