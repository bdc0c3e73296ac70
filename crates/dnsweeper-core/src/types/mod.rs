mod parse;
mod record;
mod risk;

pub use parse::*;
pub use record::*;
pub use risk::*;
