pub mod pick;
pub mod show;
