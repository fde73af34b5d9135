pub mod checks;
pub mod cli;
pub mod clients;
pub mod cluster;
pub mod commands;
pub mod configparser;
pub mod exec;
pub mod gitops;
pub mod image;
pub mod kube_util;
pub mod provision;
pub mod scaffold;
pub mod tools;

#[cfg(test)]
mod tests;
