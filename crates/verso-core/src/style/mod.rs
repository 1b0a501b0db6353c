pub mod dictionary;
pub mod labels;

pub use dictionary::{Style, StyleDictionary};
pub use labels::{StyleLabels, Unlabeled};
