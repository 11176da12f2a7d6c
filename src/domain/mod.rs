mod property;

pub use property::NormalizedProperty;
