//! Row models

mod engagement;
mod record;
mod value;

pub use engagement::*;
pub use record::*;
pub use value::*;
