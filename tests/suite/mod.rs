mod async_wrapper;
mod combinators;
mod config;
mod identity;
mod option;
mod result;
mod runner;
mod scenarios;
mod schema;
mod wire;
