//! The three ensemble model slots.
//!
//! Each slot trades data hunger for structure: the feature model needs
//! the least history, the seasonal model adds a weekly shape, the window
//! model only speaks once it has a long trailing sequence.

pub mod feature;
pub mod seasonal;
pub mod window;

pub use feature::FeatureModel;
pub use seasonal::SeasonalModel;
pub use window::WindowModel;
