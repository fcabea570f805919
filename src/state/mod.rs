pub mod draft;
pub mod flow;
pub mod step;
pub mod validation;
