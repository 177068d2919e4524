pub mod ai;
pub mod app;
pub mod db;
pub mod imaging;
