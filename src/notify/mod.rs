mod webhook;

pub use webhook::Notifier;
