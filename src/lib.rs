pub mod core;
pub mod mario;
pub mod util;
