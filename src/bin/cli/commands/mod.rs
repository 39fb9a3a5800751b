pub mod define;
pub mod due;
pub mod explain;
pub mod import;
pub mod list;
pub mod review;
pub mod show;
pub mod stats;
