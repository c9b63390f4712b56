//! Domain layer - Content model with no I/O
//!
//! This layer contains:
//! - Entities: Attraction, Region, Guide
//! - Value Objects: slugs, coordinates, visit durations, image references, tags
//! - Domain Services: map links and GPX export

pub mod entities;
pub mod services;
pub mod value_objects;
