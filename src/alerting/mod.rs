pub mod dispatch;
pub mod policy;
