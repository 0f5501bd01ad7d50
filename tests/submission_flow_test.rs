use httpmock::prelude::*;
use lead_intake::core::StepOutcome;
use lead_intake::domain::model::{Lead, LeadField};
use lead_intake::utils::validation::Validate;
use lead_intake::{http_form_controller, SiteConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(server: &MockServer, email_enabled: bool, messaging_enabled: bool) -> NamedTempFile {
    let content = format!(
        r#"
[site]
base_url = "{base}"
form_name = "contact-form"

[email]
enabled = {email_enabled}
api_url = "{base}/api/v1.0/email/send"
service_id = "service_abc123"
client_template_id = "template_client"
admin_template_id = "template_admin"
public_key = "AbCd1234EfGh5678"
admin_email = "intake@example.com"

[messaging]
enabled = {messaging_enabled}
"#,
        base = server.base_url(),
    );

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn valid_lead() -> Lead {
    Lead {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        phone_number: "5551234567".to_string(),
        email_address: "jane@example.com".to_string(),
        zip_code: "90210".to_string(),
        case_type: "Car Accident".to_string(),
        description: "Rear-ended at a light.".to_string(),
    }
}

fn load(file: &NamedTempFile) -> SiteConfig {
    let config = SiteConfig::from_file(file.path()).unwrap();
    config.validate().unwrap();
    config
}

#[tokio::test]
async fn test_end_to_end_submission_with_real_http() {
    let server = MockServer::start();

    let forms_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .x_www_form_urlencoded_tuple("form-name", "contact-form")
            .x_www_form_urlencoded_tuple("firstName", "Jane")
            .x_www_form_urlencoded_tuple("caseType", "Car Accident")
            .x_www_form_urlencoded_key_exists("submission-date");
        then.status(200);
    });
    let client_email_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1.0/email/send")
            .json_body_partial(r#"{"template_id":"template_client","user_id":"AbCd1234EfGh5678"}"#);
        then.status(200).body("OK");
    });
    let admin_email_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1.0/email/send")
            .json_body_partial(
                r#"{"template_id":"template_admin","template_params":{"to_email":"intake@example.com"}}"#,
            );
        then.status(200).body("OK");
    });
    let relay_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/.netlify/functions/send-whatsapp")
            .json_body(serde_json::to_value(valid_lead()).unwrap());
        then.status(200)
            .json_body(serde_json::json!({"success": true}));
    });

    let config_file = write_config(&server, true, true);
    let mut controller = http_form_controller(load(&config_file));
    for (key, value) in valid_lead().pairs() {
        controller.update_field(key.parse::<LeadField>().unwrap(), value);
    }

    let report = controller.submit().await.unwrap();

    forms_mock.assert();
    client_email_mock.assert();
    admin_email_mock.assert();
    relay_mock.assert();
    assert!(report.all_sent());
    assert!(controller.is_success());
    assert!(controller.draft().is_empty());
}

#[tokio::test]
async fn test_end_to_end_with_every_service_failing() {
    let server = MockServer::start();

    let forms_mock = server.mock(|when, then| {
        when.method(POST).path("/");
        then.status(500);
    });
    let email_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1.0/email/send");
        then.status(400).body("The template ID is invalid");
    });
    let relay_mock = server.mock(|when, then| {
        when.method(POST).path("/.netlify/functions/send-whatsapp");
        then.status(500)
            .json_body(serde_json::json!({"error": "WhatsApp service not configured"}));
    });

    let config_file = write_config(&server, true, true);
    let mut controller = http_form_controller(load(&config_file));
    for (key, value) in valid_lead().pairs() {
        controller.update_field(key.parse::<LeadField>().unwrap(), value);
    }

    // 整合失敗不影響成功狀態
    let report = controller.submit().await.unwrap();

    forms_mock.assert();
    email_mock.assert_hits(2);
    relay_mock.assert();
    assert_eq!(report.failures(), 4);
    assert!(controller.is_success());
    assert!(controller.error().is_none());
    assert!(controller.draft().is_empty());
}

#[tokio::test]
async fn test_end_to_end_invalid_lead_sends_nothing() {
    let server = MockServer::start();

    let any_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let config_file = write_config(&server, true, true);
    let mut controller = http_form_controller(load(&config_file));
    let mut lead = valid_lead();
    lead.email_address = "a@b".to_string();
    for (key, value) in lead.pairs() {
        controller.update_field(key.parse::<LeadField>().unwrap(), value);
    }

    let err = controller.submit().await.unwrap_err();

    any_mock.assert_hits(0);
    assert_eq!(err.to_string(), "Please enter a valid email address");
    assert_eq!(controller.error(), Some("Please enter a valid email address"));
    assert_eq!(controller.draft(), &lead);
    assert!(!controller.is_success());
}

#[tokio::test]
async fn test_end_to_end_with_notifications_disabled() {
    let server = MockServer::start();

    let forms_mock = server.mock(|when, then| {
        when.method(POST).path("/");
        then.status(200);
    });
    let email_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1.0/email/send");
        then.status(200);
    });
    let relay_mock = server.mock(|when, then| {
        when.method(POST).path("/.netlify/functions/send-whatsapp");
        then.status(200);
    });

    let config_file = write_config(&server, false, false);
    let mut controller = http_form_controller(load(&config_file));
    for (key, value) in valid_lead().pairs() {
        controller.update_field(key.parse::<LeadField>().unwrap(), value);
    }

    let report = controller.submit().await.unwrap();

    forms_mock.assert();
    email_mock.assert_hits(0);
    relay_mock.assert_hits(0);
    assert_eq!(report.forms_store, StepOutcome::Sent);
    assert!(matches!(report.relay, StepOutcome::Skipped(_)));
    assert!(controller.is_success());
}
