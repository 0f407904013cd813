//! Main module for lilex library functionality

pub mod assembling;
pub mod error;
pub mod extraction;
pub mod lexing;
pub mod loader;
pub mod model;
pub mod normalization;
pub mod pipeline;
pub mod rules;
pub mod segmenting;
pub mod testing;
