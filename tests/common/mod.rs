#![allow(dead_code)]

pub mod fixtures;
pub mod seed;
pub mod utils;
