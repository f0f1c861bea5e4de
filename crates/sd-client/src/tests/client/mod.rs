mod client;
mod envelope;
