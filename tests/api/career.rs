use crate::helpers::{assert_error_naming, attachment_payload, spawn_app, spawn_app_without_smtp};
use reqwest::multipart::{Form, Part};

fn career_form() -> Form {
    Form::new()
        .text("full_name", "John Roe")
        .text("email", "john@x.com")
        .text("phone", "+966 555 0100")
        .text("position", "Site Engineer")
        .text("years_experience", "7")
}

#[tokio::test]
async fn career_application_without_cv_is_relayed() {
    let app = spawn_app().await;

    let response = app
        .post_career(career_form().text("message", "Ten bridges and counting."))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Career form submitted");
    assert_eq!(body["email_sent"], true);

    let sent = app.sent_emails();
    assert_eq!(sent.len(), 1);
    let raw = &sent[0];
    assert!(raw.contains("Subject: New Career Application: John Roe - Site Engineer"));
    assert!(raw.contains("Years of Experience: 7"));
    assert!(raw.contains("Ten bridges and counting."));
    assert!(!raw.contains("Content-Disposition: attachment"));
}

#[tokio::test]
async fn cv_is_attached_byte_for_byte() {
    let app = spawn_app().await;
    let cv: Vec<u8> = (0..=255u8).cycle().take(5000).collect();

    let form = career_form().part(
        "cv",
        Part::bytes(cv.clone())
            .file_name("john_roe.pdf")
            .mime_str("application/pdf")
            .unwrap(),
    );
    let response = app.post_career(form).await;

    assert_eq!(response.status().as_u16(), 200);
    let sent = app.sent_emails();
    assert_eq!(sent.len(), 1);
    let raw = &sent[0];
    assert_eq!(raw.matches("Content-Disposition: attachment").count(), 1);
    assert!(raw.contains("application/octet-stream"));
    assert_eq!(attachment_payload(raw, "john_roe.pdf"), cv);
}

#[tokio::test]
async fn career_accepts_urlencoded_forms() {
    let app = spawn_app().await;

    let response = app
        .post_career_urlencoded(&[
            ("full_name", "John Roe"),
            ("email", "john@x.com"),
            ("phone", "+966 555 0100"),
            ("position", "Site Engineer"),
            ("years_experience", "7"),
            ("message", "Ten bridges & counting."),
        ])
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["email_sent"], true);

    let sent = app.sent_emails();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("Subject: New Career Application: John Roe - Site Engineer"));
    assert!(sent[0].contains("Ten bridges & counting."));
    assert!(!sent[0].contains("Content-Disposition: attachment"));
}

#[tokio::test]
async fn urlencoded_career_forms_still_need_every_field() {
    let app = spawn_app().await;

    let response = app
        .post_career_urlencoded(&[("full_name", "John Roe"), ("email", "john@x.com")])
        .await;

    assert_error_naming(response, 400, "Missing required field: phone").await;
    assert!(app.sent_emails().is_empty());
}

#[tokio::test]
async fn career_returns_400_naming_the_missing_field() {
    let app = spawn_app().await;
    let test_cases = vec![
        ("full_name", Form::new().text("message", "Hello")),
        ("email", Form::new().text("full_name", "John Roe")),
        (
            "phone",
            Form::new()
                .text("full_name", "John Roe")
                .text("email", "john@x.com"),
        ),
        (
            "position",
            Form::new()
                .text("full_name", "John Roe")
                .text("email", "john@x.com")
                .text("phone", "+966 555 0100")
                .text("position", ""),
        ),
        (
            "years_experience",
            Form::new()
                .text("full_name", "John Roe")
                .text("email", "john@x.com")
                .text("phone", "+966 555 0100")
                .text("position", "Site Engineer"),
        ),
    ];

    for (field, form) in test_cases {
        let response = app.post_career(form).await;

        assert_error_naming(
            response,
            400,
            &format!("Missing required field: {}", field),
        )
        .await;
    }
    assert!(app.sent_emails().is_empty());
}

#[tokio::test]
async fn uploaded_files_do_not_count_as_text_fields() {
    let app = spawn_app().await;
    let form = Form::new()
        .part(
            "full_name",
            Part::bytes(b"John Roe".to_vec()).file_name("name.txt"),
        )
        .text("email", "john@x.com")
        .text("phone", "+966 555 0100")
        .text("position", "Site Engineer")
        .text("years_experience", "7");

    let response = app.post_career(form).await;

    assert_error_naming(response, 400, "Missing required field: full_name").await;
}

#[tokio::test]
async fn career_is_accepted_but_not_sent_without_smtp_credentials() {
    let app = spawn_app_without_smtp().await;

    let form = career_form().part("cv", Part::bytes(vec![1, 2, 3]).file_name("cv.pdf"));
    let response = app.post_career(form).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["email_sent"], false);
    assert!(app.sent_emails().is_empty());
}
