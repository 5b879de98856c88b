pub mod init;
pub mod quiz;
pub mod record;
pub mod tags;
pub mod validate;
