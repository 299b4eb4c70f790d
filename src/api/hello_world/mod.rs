pub mod hello_world_api;
