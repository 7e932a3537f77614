pub mod orbit_path;
pub mod picking;
pub mod selection;
pub mod trail;
