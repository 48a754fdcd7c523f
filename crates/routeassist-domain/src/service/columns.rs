//! Header aliases for the spreadsheet exports
//!
//! The exports are maintained by hand, in English or Portuguese.

pub const ID: &[&str] = &["ID"];
pub const ROUTE: &[&str] = &["Route", "Rota"];
pub const CITY: &[&str] = &["City", "Cidade"];
pub const NEIGHBORHOOD: &[&str] = &["Neighborhood", "Bairro"];
pub const DISPATCH_DATE: &[&str] = &["Dispatch Date", "Data Exp.", "Data Expedição"];
pub const VEHICLE_TYPE: &[&str] = &["Vehicle Type", "Tipo Veículo", "Veículo"];
pub const PLATE: &[&str] = &["Plate", "Placa"];
pub const DRIVER_NAME: &[&str] = &["Name", "Nome"];
pub const INTEREST_ROUTE: &[&str] = &["Control-01", "Controle-01", "Rota"];
pub const INTEREST_TIMESTAMP: &[&str] = &["Timestamp", "Carimbo de data/hora"];
