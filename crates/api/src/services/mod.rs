//! Application services: external-host clients, the admin session service
//! and the generic form/mutation controller.

pub mod livestream;
pub mod media;
pub mod mutation;
pub mod session;
