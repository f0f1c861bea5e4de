mod identity;
mod month;
mod profile;
