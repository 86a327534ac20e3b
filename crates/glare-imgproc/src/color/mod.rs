mod hsv;

pub use hsv::{hsv_from_rgb_u8, rgb_from_hsv_u8};
