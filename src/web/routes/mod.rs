pub mod alert_routes;
pub mod group_routes;
pub mod history_routes;
pub mod weather_routes;
pub mod webhook_routes;
