mod dashboard;
mod home;

pub use dashboard::Dashboard;
pub use home::Home;
