mod dataset;
mod loader;
mod split;

pub use dataset::Dataset;
pub use loader::LoadOptions;
pub use split::DEFAULT_HOLDOUT;
