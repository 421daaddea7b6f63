pub const BLOCK_SIZE: u32 = BLOCK_SIZE_X * BLOCK_SIZE_Y;
pub const BLOCK_SIZE_X: u32 = 16;
pub const BLOCK_SIZE_Y: u32 = 16;

/// The background gray of a cleared color buffer.
pub const COLOR_BACKGROUND: [f32; 3] = [0.6, 0.6, 0.6];
/// The value of a cleared depth slot.
pub const DEPTH_CLEAR: f32 = 0.0;
/// `|det|` below this is treated as singular.
pub const DETERMINANT_EPSILON: f32 = 1e-5;

pub const IMAGE_HEIGHT: u32 = 800;
pub const IMAGE_WIDTH: u32 = 800;

/// Marks a pixel that no triangle covers.
pub const TAG_EMPTY: i32 = -1;
