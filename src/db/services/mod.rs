pub mod group_service;
pub mod history_service;
