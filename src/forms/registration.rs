use crate::form::StepwiseForm;
use crate::gateway::SubmitPurpose;
use crate::state::step::{FieldSpec, Sanitize, Step};
use crate::validators;

pub const STEP_TITLES: [&str; 4] = [
    "Personal Info",
    "Professional Info",
    "Clinic Address",
    "Security",
];

pub const SPECIALIZATIONS: [&str; 17] = [
    "Cardiology",
    "Dermatology",
    "Endocrinology",
    "Family Medicine",
    "Gastroenterology",
    "General Surgery",
    "Internal Medicine",
    "Neurology",
    "Obstetrics & Gynecology",
    "Oncology",
    "Ophthalmology",
    "Orthopedics",
    "Pediatrics",
    "Psychiatry",
    "Radiology",
    "Urology",
    "Other",
];

pub fn provider_registration() -> StepwiseForm {
    StepwiseForm::new(
        "provider-registration",
        SubmitPurpose::Register,
        vec![
            personal_info(),
            professional_info(),
            clinic_address(),
            security(),
        ],
    )
}

fn name_field(id: &str, label: &str) -> FieldSpec {
    FieldSpec::text(id, label)
        .required(format!("{label} is required"))
        .validator(validators::min_length(
            2,
            format!("{label} must be at least 2 characters"),
        ))
        .validator(validators::max_length(
            50,
            format!("{label} must be less than 50 characters"),
        ))
}

fn personal_info() -> Step {
    Step::builder("personal", STEP_TITLES[0])
        .field(name_field("first_name", "First name"))
        .field(name_field("last_name", "Last name"))
        .field(
            FieldSpec::text("email", "Email address")
                .required("Email is required")
                .validator(validators::email("Please enter a valid email address"))
                .sanitize(Sanitize::Lowercase),
        )
        .field(
            FieldSpec::text("phone", "Phone number")
                .required("Phone number is required")
                .validator(validators::phone("Please enter a valid phone number")),
        )
        .build()
}

fn professional_info() -> Step {
    Step::builder("professional", STEP_TITLES[1])
        .field(
            FieldSpec::choice("specialization", "Specialization", SPECIALIZATIONS)
                .required("Specialization is required")
                .validator(validators::min_length(
                    3,
                    "Specialization must be at least 3 characters",
                ))
                .validator(validators::max_length(
                    100,
                    "Specialization must be less than 100 characters",
                ))
                .validator(validators::one_of(
                    SPECIALIZATIONS,
                    "Please choose a specialization from the list",
                )),
        )
        .field(
            FieldSpec::text("medical_license_number", "Medical license number")
                .required("Medical license number is required")
                .validator(validators::license_number(
                    "License number must be 6-12 alphanumeric characters",
                ))
                .sanitize(Sanitize::Uppercase),
        )
        .field(
            FieldSpec::number("years_of_experience", "Years of experience")
                .required("Years of experience is required")
                .validator(validators::number_range(
                    0,
                    50,
                    "Years of experience must be between 0 and 50",
                )),
        )
        .build()
}

fn clinic_address() -> Step {
    Step::builder("clinic_address", STEP_TITLES[2])
        .field(
            FieldSpec::text("street_address", "Street address")
                .required("Street address is required")
                .validator(validators::max_length(
                    200,
                    "Street address must be less than 200 characters",
                )),
        )
        .field(
            FieldSpec::text("city", "City")
                .required("City is required")
                .validator(validators::max_length(
                    100,
                    "City must be less than 100 characters",
                )),
        )
        .field(
            FieldSpec::text("state", "State/Province")
                .required("State/Province is required")
                .validator(validators::max_length(
                    50,
                    "State/Province must be less than 50 characters",
                )),
        )
        .field(
            FieldSpec::text("zip_code", "ZIP/Postal code")
                .required("ZIP/Postal code is required")
                .validator(validators::zip_code("Please enter a valid ZIP/Postal code")),
        )
        .build()
}

fn security() -> Step {
    Step::builder("security", STEP_TITLES[3])
        .field(
            FieldSpec::secret("password", "Password")
                .required("Password is required")
                .validator(validators::password_strength(validators::STRONG_PASSWORD_MESSAGE)),
        )
        .field(
            FieldSpec::secret("confirm_password", "Confirm password")
                .required("Please confirm your password")
                .sanitize(Sanitize::Omit),
        )
        .matches("confirm_password", "password", "Passwords do not match")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_steps_in_order() {
        let form = provider_registration();
        let titles: Vec<&str> = form
            .flow()
            .steps()
            .iter()
            .map(|step| step.title.as_str())
            .collect();
        assert_eq!(titles, STEP_TITLES);
        assert_eq!(form.flow().fields().count(), 13);
    }

    #[test]
    fn personal_step_messages() {
        let mut form = provider_registration();
        form.update_field("first_name", "A").expect("update");
        form.update_field("last_name", "x".repeat(51)).expect("update");
        form.update_field("email", "not-an-email").expect("update");
        form.update_field("phone", "abc").expect("update");

        assert_eq!(form.validate_step(0), Ok(false));
        assert_eq!(form.error("first_name"), Some("First name must be at least 2 characters"));
        assert_eq!(form.error("last_name"), Some("Last name must be less than 50 characters"));
        assert_eq!(form.error("email"), Some("Please enter a valid email address"));
        assert_eq!(form.error("phone"), Some("Please enter a valid phone number"));
    }

    #[test]
    fn professional_step_messages() {
        let mut form = provider_registration();
        form.update_field("specialization", "Astrology").expect("update");
        form.update_field("medical_license_number", "AB1").expect("update");
        form.update_field("years_of_experience", 51_i64).expect("update");

        assert_eq!(form.validate_step(1), Ok(false));
        assert_eq!(
            form.error("specialization"),
            Some("Please choose a specialization from the list")
        );
        assert_eq!(
            form.error("medical_license_number"),
            Some("License number must be 6-12 alphanumeric characters")
        );
        assert_eq!(
            form.error("years_of_experience"),
            Some("Years of experience must be between 0 and 50")
        );

        form.update_field("specialization", "Neurology").expect("update");
        form.update_field("medical_license_number", "md12345").expect("update");
        form.update_field("years_of_experience", 0_i64).expect("update");
        assert_eq!(form.validate_step(1), Ok(true));
    }

    #[test]
    fn security_step_messages() {
        let mut form = provider_registration();
        form.update_field("password", "abc").expect("update");
        assert_eq!(form.validate_step(3), Ok(false));
        assert_eq!(form.error("password"), Some(validators::STRONG_PASSWORD_MESSAGE));
        assert_eq!(form.error("confirm_password"), Some("Please confirm your password"));

        form.update_field("password", "Abcdef1!").expect("update");
        form.update_field("confirm_password", "Abcdef1?").expect("update");
        assert_eq!(form.validate_step(3), Ok(false));
        assert_eq!(form.error("password"), None);
        assert_eq!(form.error("confirm_password"), Some("Passwords do not match"));
    }
}
