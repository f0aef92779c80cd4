//! Main module for pygrammar library functionality

pub mod config;
pub mod formats;
pub mod grammar;
pub mod lexing;
pub mod parsing;
pub mod testing;
pub mod token;
