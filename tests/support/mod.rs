#![allow(dead_code)]

pub mod data;
pub mod featscope_env;
