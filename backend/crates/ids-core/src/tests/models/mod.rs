mod email;
mod match_key;
mod role_update;
