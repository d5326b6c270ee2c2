//! Utility-class to inline style translation

mod table;
mod translator;
mod value;

pub use table::{StyleTable, Vocabularies, Vocabulary};
pub use translator::{strip_prefix, ClassConversion, StyleTranslator};
pub use value::{StyleObject, StyleValue};
