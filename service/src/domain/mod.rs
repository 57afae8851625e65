//! Domain definitions.

pub mod import;
pub mod lead;

pub use self::{
    import::{ImportError, ImportJob},
    lead::Lead,
};
