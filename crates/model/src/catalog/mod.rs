pub mod attribute;
pub mod scope;
