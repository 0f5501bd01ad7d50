use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A prospective client's contact details and case description, as typed into the form.
///
/// Field names on the wire are camelCase (`firstName`, `zipCode`, ...), shared by the
/// forms store, the email templates and the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub case_type: String,
    #[serde(default)]
    pub description: String,
}

impl Lead {
    pub fn is_empty(&self) -> bool {
        *self == Lead::default()
    }

    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::FirstName => &self.first_name,
            LeadField::LastName => &self.last_name,
            LeadField::PhoneNumber => &self.phone_number,
            LeadField::EmailAddress => &self.email_address,
            LeadField::ZipCode => &self.zip_code,
            LeadField::CaseType => &self.case_type,
            LeadField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: LeadField, value: String) {
        let slot = match field {
            LeadField::FirstName => &mut self.first_name,
            LeadField::LastName => &mut self.last_name,
            LeadField::PhoneNumber => &mut self.phone_number,
            LeadField::EmailAddress => &mut self.email_address,
            LeadField::ZipCode => &mut self.zip_code,
            LeadField::CaseType => &mut self.case_type,
            LeadField::Description => &mut self.description,
        };
        *slot = value;
    }

    /// Flat key/value view in form order, using the wire names.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        LeadField::ALL
            .iter()
            .map(|field| (field.wire_name(), self.get(*field)))
            .collect()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadField {
    FirstName,
    LastName,
    PhoneNumber,
    EmailAddress,
    ZipCode,
    CaseType,
    Description,
}

impl LeadField {
    pub const ALL: [LeadField; 7] = [
        LeadField::FirstName,
        LeadField::LastName,
        LeadField::PhoneNumber,
        LeadField::EmailAddress,
        LeadField::ZipCode,
        LeadField::CaseType,
        LeadField::Description,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            LeadField::FirstName => "firstName",
            LeadField::LastName => "lastName",
            LeadField::PhoneNumber => "phoneNumber",
            LeadField::EmailAddress => "emailAddress",
            LeadField::ZipCode => "zipCode",
            LeadField::CaseType => "caseType",
            LeadField::Description => "description",
        }
    }
}

impl FromStr for LeadField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadField::ALL
            .iter()
            .copied()
            .find(|field| field.wire_name() == s)
            .ok_or_else(|| format!("Unknown form field: {}", s))
    }
}

/// The fixed set of case categories offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseType {
    PersonalInjury,
    CarAccident,
    MedicalMalpractice,
    WorkersCompensation,
    WrongfulDeath,
    SlipAndFall,
    ProductLiability,
    Other,
}

impl CaseType {
    pub const ALL: [CaseType; 8] = [
        CaseType::PersonalInjury,
        CaseType::CarAccident,
        CaseType::MedicalMalpractice,
        CaseType::WorkersCompensation,
        CaseType::WrongfulDeath,
        CaseType::SlipAndFall,
        CaseType::ProductLiability,
        CaseType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CaseType::PersonalInjury => "Personal Injury",
            CaseType::CarAccident => "Car Accident",
            CaseType::MedicalMalpractice => "Medical Malpractice",
            CaseType::WorkersCompensation => "Workers Compensation",
            CaseType::WrongfulDeath => "Wrongful Death",
            CaseType::SlipAndFall => "Slip and Fall",
            CaseType::ProductLiability => "Product Liability",
            CaseType::Other => "Other",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseType::ALL
            .iter()
            .copied()
            .find(|case| case.label() == s)
            .ok_or_else(|| format!("Unknown case type: {}", s))
    }
}

/// What the forms store receives: the lead plus the form identifier and a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_name: String,
    pub submitted_at: String,
    pub lead: Lead,
}

impl FormSubmission {
    /// `form-name`, `submission-date`, then the seven lead fields.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("form-name", self.form_name.as_str()),
            ("submission-date", self.submitted_at.as_str()),
        ];
        pairs.extend(self.lead.pairs());
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Client,
    Admin,
}

/// A templated email request; the template service renders and delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub recipient: Recipient,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub template_params: BTreeMap<String, String>,
}

/// Result of one best-effort submission step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Sent,
    Skipped(String),
    Failed(String),
}

impl StepOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, StepOutcome::Sent)
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Sent => f.write_str("sent"),
            StepOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
            StepOutcome::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// Outcomes of the four submission steps, in the order they ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub forms_store: StepOutcome,
    pub client_email: StepOutcome,
    pub admin_email: StepOutcome,
    pub relay: StepOutcome,
}

impl SubmissionReport {
    pub fn all_sent(&self) -> bool {
        self.steps().iter().all(|(_, outcome)| outcome.is_sent())
    }

    pub fn failures(&self) -> usize {
        self.steps()
            .iter()
            .filter(|(_, outcome)| matches!(outcome, StepOutcome::Failed(_)))
            .count()
    }

    pub fn steps(&self) -> [(&'static str, &StepOutcome); 4] {
        [
            ("forms_store", &self.forms_store),
            ("client_email", &self.client_email),
            ("admin_email", &self.admin_email),
            ("relay", &self.relay),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_serializes_with_wire_names() {
        let lead = Lead {
            first_name: "Jane".to_string(),
            zip_code: "90210".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["zipCode"], "90210");
        assert_eq!(json.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_lead_deserializes_partial_body() {
        let lead: Lead = serde_json::from_str(r#"{"firstName":"Jane"}"#).unwrap();
        assert_eq!(lead.first_name, "Jane");
        assert!(lead.description.is_empty());
    }

    #[test]
    fn test_field_set_touches_only_that_field() {
        let mut lead = Lead::default();
        lead.set(LeadField::PhoneNumber, "5551234567".to_string());
        assert_eq!(lead.phone_number, "5551234567");
        assert_eq!(lead.get(LeadField::FirstName), "");
        assert!(!lead.is_empty());
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!("caseType".parse::<LeadField>().unwrap(), LeadField::CaseType);
        assert!("case_type".parse::<LeadField>().is_err());
    }

    #[test]
    fn test_case_type_labels() {
        assert_eq!("Car Accident".parse::<CaseType>().unwrap(), CaseType::CarAccident);
        assert_eq!(CaseType::SlipAndFall.to_string(), "Slip and Fall");
        assert!("Divorce".parse::<CaseType>().is_err());
    }

    #[test]
    fn test_form_submission_pairs_order() {
        let submission = FormSubmission {
            form_name: "contact-form".to_string(),
            submitted_at: "1/2/2026, 3:04:05 PM".to_string(),
            lead: Lead::default(),
        };
        let keys: Vec<&str> = submission.pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys[0], "form-name");
        assert_eq!(keys[1], "submission-date");
        assert_eq!(keys[2], "firstName");
        assert_eq!(keys.len(), 9);
    }

    #[test]
    fn test_report_counts_failures() {
        let report = SubmissionReport {
            forms_store: StepOutcome::Sent,
            client_email: StepOutcome::Skipped("email disabled".to_string()),
            admin_email: StepOutcome::Failed("timeout".to_string()),
            relay: StepOutcome::Sent,
        };
        assert!(!report.all_sent());
        assert_eq!(report.failures(), 1);
    }
}
