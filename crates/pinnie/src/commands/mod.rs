pub mod banner;
pub mod daemon;
pub mod init;
pub mod list;
pub mod send;
pub mod start;
pub mod status;
pub mod stop;
