pub mod alerting;
pub mod config;
pub mod db;
pub mod notifications;
pub mod sensor;
pub mod web;
