mod events;
mod models;
