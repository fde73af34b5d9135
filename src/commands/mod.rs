pub mod apply;
pub mod bootstrap;
pub mod build;
pub mod cleanup;
pub mod dev;
pub mod health;
pub mod hosts;
pub mod init;
pub mod install_tools;
pub mod reconcile;
pub mod scale;
pub mod smoke;
pub mod status;
pub mod validate;

// These modules should not do much and act mostly as a thunk to handle
// displaying outputs/errors of the real function.
