pub mod overlay;
pub mod xml;

pub use overlay::write_overlay_svg;
