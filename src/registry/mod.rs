pub mod city_registry;
pub mod error;
