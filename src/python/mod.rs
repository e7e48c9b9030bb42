//! Python bindings for CapSim.

pub mod bindings;
