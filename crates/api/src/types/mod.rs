mod collection;
mod image;
mod place;
mod story;
mod tag;

pub use collection::*;
pub use image::*;
pub use place::*;
pub use story::*;
pub use tag::*;
