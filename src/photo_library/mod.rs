pub mod impl_directory;
pub mod interface;
