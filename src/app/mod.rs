mod failures;
mod progress;
mod runner;
mod source;

pub(crate) use runner::run;
