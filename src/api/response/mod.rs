pub mod get_devices;
pub mod login;
