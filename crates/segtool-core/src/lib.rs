pub mod error;
pub mod consts;
pub mod config;
pub mod mask;
pub mod trimap;
pub mod overlay;
pub mod viewport;
pub mod oracle;
pub mod compositor;
pub mod session;
pub mod command;
pub mod io;
