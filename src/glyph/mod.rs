pub mod assignment;
pub mod repertoire;
