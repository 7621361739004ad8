//! Decentralized energy supply system: a battery and a hydrogen path behind one controller.

pub mod action;
pub mod battery;
pub mod config;
pub mod controller;
pub mod hydrogen;
pub mod state;

pub use self::{
    action::Action,
    config::DessConfig,
    controller::{Controller, Operation, Setpoints},
    state::StorageState,
};
