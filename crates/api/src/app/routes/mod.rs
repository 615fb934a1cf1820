pub mod artists;
pub mod coffee;
pub mod flash;
pub mod home;
pub mod shows;
pub mod system;
pub mod trivia;
pub mod venues;
