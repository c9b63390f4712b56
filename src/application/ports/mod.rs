//! Ports - Boundaries between the application and external systems

pub mod outbound;
