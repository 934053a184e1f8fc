#![allow(dead_code)]

pub mod exoscope_env;
pub mod mock_service;
