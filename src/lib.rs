//! Núcleo de mantenimiento de vehículos
//!
//! Calcula el próximo vencimiento de cada ítem (por km o por tiempo) y
//! registra servicios realizados actualizando odómetro, calendario e
//! historial en una sola transacción.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
