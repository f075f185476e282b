// Domain layer - Pure models and heuristics, no I/O
pub mod briefing;
pub mod city_name;
pub mod city_tier;
pub mod delivery_window;
pub mod error;
pub mod local_time;
pub mod news;
pub mod route;
pub mod traffic;
pub mod weather;
pub mod zone;
