//! External user store implementation on MySQL

mod mysql_user_store;

pub use mysql_user_store::MySqlUserStore;
