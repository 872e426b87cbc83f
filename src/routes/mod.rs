pub mod data_routes;
pub mod system_routes;
