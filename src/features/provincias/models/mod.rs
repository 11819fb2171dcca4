mod provincia;

pub use provincia::{Provincia, ProvinciaWithCount};
