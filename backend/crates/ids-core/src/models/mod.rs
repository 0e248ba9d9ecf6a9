pub mod email;
pub mod role;
pub mod role_update;
pub mod user_draft;
pub mod user_record;
