//! Version reading, bumping, and composite tag derivation for the two
//! configured sub-projects.

pub mod bumper;
pub mod composer;
pub mod manifest;
pub mod reader;

pub use bumper::VersionBumper;
pub use composer::TagComposer;
pub use reader::VersionReader;
