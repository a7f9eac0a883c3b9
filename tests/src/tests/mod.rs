mod admin;
mod refresh;
mod session;
