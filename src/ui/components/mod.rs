pub mod image_grid;
pub mod navbar;
pub mod search_panel;
pub mod upload_panel;

pub use image_grid::{ImageCard, ImageGrid};
pub use navbar::Navbar;
pub use search_panel::SearchPanel;
pub use upload_panel::UploadPanel;
