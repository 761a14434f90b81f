//! A small virtual bistro.
//!
//! Dishes come in three kinds (appetizer, main course, dessert) sharing a
//! common set of fields. A [`kitchen::Kitchen`] owns the dishes on the menu,
//! keeps running statistics over them and can adjust every dish for a
//! [`dietary::DietaryRequest`]. Menus are imported line by line through
//! [`record::decode_record`].

pub mod dietary;
pub mod food;
pub mod kitchen;
pub mod record;
