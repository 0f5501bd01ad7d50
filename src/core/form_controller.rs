use crate::config::SiteConfig;
use crate::domain::model::{
    CaseType, EmailMessage, FormSubmission, Lead, LeadField, Recipient, StepOutcome,
    SubmissionReport,
};
use crate::domain::ports::{EmailSender, FormsStore, RelayNotifier};
use crate::utils::error::{LeadError, Result};
use crate::utils::validation::{is_blank, is_valid_email, is_valid_zip_code};
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

/// How long the success confirmation stays visible after a submission.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(7);

/// First failing rule wins; the order is part of the form's behaviour.
pub fn check_lead(lead: &Lead) -> std::result::Result<(), &'static str> {
    if is_blank(&lead.first_name) {
        return Err("Please enter your first name");
    }
    if is_blank(&lead.last_name) {
        return Err("Please enter your last name");
    }
    if is_blank(&lead.phone_number) {
        return Err("Please enter your phone number");
    }
    if is_blank(&lead.email_address) {
        return Err("Please enter your email address");
    }
    if is_blank(&lead.zip_code) {
        return Err("Please enter your zip code");
    }
    if lead.case_type.parse::<CaseType>().is_err() {
        return Err("Please select a case type");
    }
    if is_blank(&lead.description) {
        return Err("Please describe what happened");
    }
    if !is_valid_email(&lead.email_address) {
        return Err("Please enter a valid email address");
    }
    if !is_valid_zip_code(&lead.zip_code) {
        return Err("Please enter a valid 5-digit zip code");
    }
    Ok(())
}

/// `3/14/2026, 9:26:53 AM`
pub fn format_submission_date(at: NaiveDateTime) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// `Saturday, March 14, 2026 at 09:26 AM`
pub fn format_email_date(at: NaiveDateTime) -> String {
    at.format("%A, %B %-d, %Y at %I:%M %p").to_string()
}

/// Owns the draft lead and drives one submission through the four collaborators.
pub struct FormController<F: FormsStore, E: EmailSender, R: RelayNotifier> {
    config: SiteConfig,
    forms: F,
    email: E,
    relay: R,
    draft: Lead,
    submitting: bool,
    success_since: Option<Instant>,
    error: Option<String>,
}

impl<F: FormsStore, E: EmailSender, R: RelayNotifier> FormController<F, E, R> {
    pub fn new(config: SiteConfig, forms: F, email: E, relay: R) -> Self {
        Self {
            config,
            forms,
            email,
            relay,
            draft: Lead::default(),
            submitting: false,
            success_since: None,
            error: None,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn draft(&self) -> &Lead {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `submit` takes `&mut self`, so the borrow itself keeps a second submission
    /// out while one is in flight; from outside this only ever reads `false`.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// True until `SUCCESS_DISPLAY` has elapsed since the last successful submit.
    pub fn is_success(&self) -> bool {
        self.success_since
            .is_some_and(|since| since.elapsed() < SUCCESS_DISPLAY)
    }

    pub fn update_field(&mut self, field: LeadField, value: impl Into<String>) {
        self.draft.set(field, value.into());
    }

    pub fn validate(&mut self) -> bool {
        match check_lead(&self.draft) {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(message) => {
                self.error = Some(message.to_string());
                false
            }
        }
    }

    /// Runs the four steps in order. Only validation can make this fail; every
    /// integration failure is logged and recorded in the report instead.
    pub async fn submit(&mut self) -> Result<SubmissionReport> {
        if !self.validate() {
            let message = self.error.clone().unwrap_or_default();
            tracing::info!("Submission refused: {}", message);
            return Err(LeadError::validation(message));
        }

        self.submitting = true;
        self.success_since = None;

        let lead = self.draft.clone();
        let now = Local::now().naive_local();

        let forms_store = self.record_submission(&lead, now).await;
        let client_email = self.send_email(&lead, Recipient::Client, now).await;
        let admin_email = self.send_email(&lead, Recipient::Admin, now).await;
        let relay = self.notify_relay(&lead).await;

        let report = SubmissionReport {
            forms_store,
            client_email,
            admin_email,
            relay,
        };

        for (step, outcome) in report.steps() {
            tracing::info!(step, outcome = %outcome, "Submission step finished");
        }
        if report.failures() > 0 {
            tracing::warn!(
                "{} of 4 submission steps failed; showing confirmation anyway",
                report.failures()
            );
        }

        self.submitting = false;
        self.success_since = Some(Instant::now());
        self.draft = Lead::default();

        Ok(report)
    }

    async fn record_submission(&self, lead: &Lead, now: NaiveDateTime) -> StepOutcome {
        let submission = FormSubmission {
            form_name: self.config.site.form_name.clone(),
            submitted_at: format_submission_date(now),
            lead: lead.clone(),
        };

        match self.forms.record(&submission).await {
            Ok(()) => {
                tracing::info!("✅ Lead recorded in forms store");
                StepOutcome::Sent
            }
            Err(e) => {
                tracing::error!("❌ Forms store submission failed: {}", e);
                StepOutcome::Failed(e.to_string())
            }
        }
    }

    async fn send_email(
        &self,
        lead: &Lead,
        recipient: Recipient,
        now: NaiveDateTime,
    ) -> StepOutcome {
        if !self.config.email_ready() {
            return StepOutcome::Skipped("email notifications not configured".to_string());
        }

        let message = self.build_email(lead, recipient, now);
        match self.email.send(&message).await {
            Ok(()) => {
                tracing::info!("✅ {:?} email sent", recipient);
                StepOutcome::Sent
            }
            Err(e) => {
                tracing::error!("❌ {:?} email failed: {}", recipient, e);
                StepOutcome::Failed(e.to_string())
            }
        }
    }

    async fn notify_relay(&self, lead: &Lead) -> StepOutcome {
        if !self.config.messaging_enabled() {
            return StepOutcome::Skipped("messaging notifications disabled".to_string());
        }

        match self.relay.notify(lead).await {
            Ok(()) => {
                tracing::info!("✅ Notification relay accepted the lead");
                StepOutcome::Sent
            }
            Err(e) => {
                tracing::error!("❌ Notification relay failed: {}", e);
                StepOutcome::Failed(e.to_string())
            }
        }
    }

    pub fn build_email(&self, lead: &Lead, recipient: Recipient, now: NaiveDateTime) -> EmailMessage {
        let email = &self.config.email;

        let mut template_params: BTreeMap<String, String> = lead
            .pairs()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        template_params.insert("submissionDate".to_string(), format_email_date(now));
        template_params.insert("reply_to".to_string(), lead.email_address.clone());

        let template_id = match recipient {
            Recipient::Client => email.client_template_id.clone(),
            Recipient::Admin => {
                template_params.insert("to_email".to_string(), email.admin_email.clone());
                email.admin_template_id.clone()
            }
        };

        EmailMessage {
            recipient,
            service_id: email.service_id.clone(),
            template_id,
            public_key: email.public_key.clone(),
            template_params,
        }
    }
}
