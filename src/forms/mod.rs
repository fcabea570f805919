pub mod login;
pub mod registration;

pub use login::{patient_login, provider_login};
pub use registration::provider_registration;
