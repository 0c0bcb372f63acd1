
pub mod bbox;
pub mod image;
pub mod scene;
pub mod camera;
pub mod shapes;
pub mod window;
pub mod numeric;
pub mod overlay;
pub mod interval;
pub mod projector;
pub mod controller;
pub mod orientation;
pub mod json_structs;
pub mod json_parser;

pub mod prelude;
