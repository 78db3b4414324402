pub mod exec;
pub mod kueue;
pub mod openshift;
