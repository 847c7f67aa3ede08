pub mod app;
pub mod fill;
pub mod history;
pub mod logging;
pub mod model;
pub mod raster;
pub mod save;
pub mod session;
pub mod settings;
pub mod surface;
pub mod transform;
