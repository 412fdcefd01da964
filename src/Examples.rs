//! examples of usage of RustedTaylor
/// series arithmetic and symbolic expansion examples
pub mod taylor_examples;
