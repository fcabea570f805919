use crate::form::StepwiseForm;
use crate::forms;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Provider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    AppointmentsToday,
    AppointmentsThisWeek,
    RevenueToday,
    RevenueThisWeek,
    PatientsWaitlist,
    AverageRating,
    NextAppointment,
    PrescriptionRefills,
    HealthReminders,
    UpcomingAppointments,
    CompletedAppointments,
}

impl MetricKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::AppointmentsToday => "Appointments today",
            Self::AppointmentsThisWeek => "Appointments this week",
            Self::RevenueToday => "Revenue today",
            Self::RevenueThisWeek => "Revenue this week",
            Self::PatientsWaitlist => "Patients waiting",
            Self::AverageRating => "Average patient rating",
            Self::NextAppointment => "Next appointment",
            Self::PrescriptionRefills => "Pending refills",
            Self::HealthReminders => "Health reminders due this week",
            Self::UpcomingAppointments => "Upcoming appointments",
            Self::CompletedAppointments => "Completed appointments",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    Appointments,
    Patients,
    Providers,
    Revenue,
    ManageAvailability,
    ManageAppointments,
    FindProviders,
    ViewPatients,
}

impl NavItem {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Appointments => "Appointments",
            Self::Patients => "Patients",
            Self::Providers => "Providers",
            Self::Revenue => "Revenue",
            Self::ManageAvailability => "Manage Availability",
            Self::ManageAppointments => "Manage Appointments",
            Self::FindProviders => "Find Providers",
            Self::ViewPatients => "View Patients",
        }
    }
}

const PROVIDER_METRICS: &[MetricKind] = &[
    MetricKind::AppointmentsToday,
    MetricKind::AppointmentsThisWeek,
    MetricKind::RevenueToday,
    MetricKind::RevenueThisWeek,
    MetricKind::PatientsWaitlist,
    MetricKind::AverageRating,
];

const PATIENT_METRICS: &[MetricKind] = &[
    MetricKind::NextAppointment,
    MetricKind::PrescriptionRefills,
    MetricKind::HealthReminders,
    MetricKind::UpcomingAppointments,
    MetricKind::CompletedAppointments,
];

const PROVIDER_NAV: &[NavItem] = &[
    NavItem::Dashboard,
    NavItem::Appointments,
    NavItem::Patients,
    NavItem::Revenue,
    NavItem::ManageAvailability,
    NavItem::ViewPatients,
];

const PATIENT_NAV: &[NavItem] = &[
    NavItem::Dashboard,
    NavItem::Appointments,
    NavItem::Providers,
    NavItem::ManageAppointments,
    NavItem::FindProviders,
];

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Provider => "Healthcare Provider",
        }
    }

    pub fn dashboard_route(self) -> &'static str {
        match self {
            Self::Patient => "/patient-dashboard",
            Self::Provider => "/provider-dashboard",
        }
    }

    pub fn metrics(self) -> &'static [MetricKind] {
        match self {
            Self::Patient => PATIENT_METRICS,
            Self::Provider => PROVIDER_METRICS,
        }
    }

    pub fn navigation(self) -> &'static [NavItem] {
        match self {
            Self::Patient => PATIENT_NAV,
            Self::Provider => PROVIDER_NAV,
        }
    }

    pub fn login_form(self) -> StepwiseForm {
        match self {
            Self::Patient => forms::patient_login(),
            Self::Provider => forms::provider_login(),
        }
    }

    pub fn all() -> [Role; 2] {
        [Self::Patient, Self::Provider]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_is_provider_only() {
        assert!(Role::Provider.navigation().contains(&NavItem::Revenue));
        assert!(!Role::Patient.navigation().contains(&NavItem::Revenue));
        assert!(Role::Provider.metrics().contains(&MetricKind::AverageRating));
        assert!(Role::Patient.metrics().contains(&MetricKind::PrescriptionRefills));
    }

    #[test]
    fn login_form_follows_role() {
        assert_eq!(Role::Patient.login_form().name(), "patient-login");
        assert_eq!(Role::Provider.login_form().name(), "provider-login");
        assert_eq!(Role::Provider.dashboard_route(), "/provider-dashboard");
    }
}
