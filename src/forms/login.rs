use crate::form::StepwiseForm;
use crate::gateway::SubmitPurpose;
use crate::state::step::{FieldSpec, Sanitize, Step};
use crate::validators;

fn email_field() -> FieldSpec {
    FieldSpec::text("email", "Email address")
        .required("Email is required")
        .validator(validators::email("Please enter a valid email address"))
        .sanitize(Sanitize::Lowercase)
}

fn password_field(min_len: usize) -> FieldSpec {
    FieldSpec::secret("password", "Password")
        .required("Password is required")
        .validator(validators::min_length(
            min_len,
            format!("Password must be at least {min_len} characters long"),
        ))
}

pub fn provider_login() -> StepwiseForm {
    StepwiseForm::new(
        "provider-login",
        SubmitPurpose::Login,
        vec![
            Step::builder("sign_in", "Provider Sign In")
                .field(email_field())
                .field(password_field(8))
                .field(FieldSpec::toggle("remember_me", "Remember me"))
                .build(),
        ],
    )
}

pub fn patient_login() -> StepwiseForm {
    StepwiseForm::new(
        "patient-login",
        SubmitPurpose::Login,
        vec![
            Step::builder("sign_in", "Patient Portal")
                .description("Sign in to access your health information")
                .field(email_field())
                .field(password_field(6).sanitize(Sanitize::Trim))
                .build(),
        ],
    )
}
