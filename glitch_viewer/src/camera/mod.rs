//! Camera module - free-flying first-person camera.
//!
//! The camera is a plain owned value. The render loop feeds it keyboard,
//! mouse and scroll deltas and reads back the view matrix and zoom.

mod camera;

pub use camera::{
    Camera, CameraMovement,
    DEFAULT_YAW, DEFAULT_PITCH, DEFAULT_SPEED, DEFAULT_SENSITIVITY, DEFAULT_ZOOM,
    PITCH_LIMIT, ZOOM_MIN, ZOOM_MAX,
};
