//! Command implementations for the WildBug CLI.

pub mod extract;
pub mod image;
pub mod info;
pub mod list;
pub mod pack;

pub use extract::cmd_extract;
pub use image::cmd_image;
pub use info::cmd_info;
pub use list::cmd_list;
pub use pack::cmd_pack;
