mod checks;
mod config;
mod gitops;
mod hosts;
mod scaffold;
mod waiter;
