//! Domain modules: types, wire parsing, selection logic, sub-clients.

pub mod price;
