//! HTTP request handlers

pub mod audio;
pub mod health;
pub mod voices;
pub mod whatsapp;
