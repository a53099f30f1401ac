//! In-memory rendering of noise fields and classified grids.
//!
//! Produces RGBA [`MapImage`]s and text previews for a host renderer to
//! display. Nothing here touches the filesystem.

mod image;
mod renderers;

pub use self::image::MapImage;
pub use renderers::{
    UNKNOWN_CATEGORY_COLOR, UNKNOWN_CATEGORY_GLYPH, category_color, render_classified,
    render_glyphs, render_noise_grayscale, render_with_registry, value_to_gray,
};
