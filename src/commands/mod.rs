pub mod call;
pub mod generate;
pub mod init;
pub mod platform;
