// Adapters layer: concrete implementations for external systems (webhook, file export).

pub mod export;
pub mod webhook;
