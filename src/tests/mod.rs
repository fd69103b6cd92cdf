pub mod helpers;

mod users;
