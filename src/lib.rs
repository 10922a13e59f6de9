pub mod address_book;
pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod passcode;
pub mod render;
pub mod routes;
pub mod startup;
pub mod telemetry;
