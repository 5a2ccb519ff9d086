//! Domain types shared across the version-bump and tag-push workflow

pub mod tag;
pub mod version;

pub use tag::CompositeTag;
pub use version::Version;
