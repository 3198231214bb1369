pub mod check;
pub mod config;
pub mod dispatch;
pub mod score;
pub mod watch;
