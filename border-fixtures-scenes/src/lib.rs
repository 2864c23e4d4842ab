pub mod expectations;
pub mod painter;
pub mod scene;

pub use expectations::{check_classifications, ClassificationExpectation};
pub use painter::paint_border;
pub use scene::{build_main_scene, SceneRecorder, CANVAS_HEIGHT, CANVAS_WIDTH};
