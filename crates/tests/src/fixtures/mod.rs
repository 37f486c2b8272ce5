pub mod member_backend;
pub mod seed;
pub mod test_app;
