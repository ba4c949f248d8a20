//! Row-to-entity conversions
//!
//! Every mapper is a `From<Row> for Entity` impl; insert payloads come
//! from the domain layer already shaped for storage, so there is no inverse
//! direction.

mod activity;
mod notification;
mod user;
