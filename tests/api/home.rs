use crate::helpers::spawn_app;

#[tokio::test]
async fn home_describes_the_service() {
    let app = spawn_app().await;

    let response = app.get_home().await;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["message"].as_str().unwrap().ends_with(" API"));
    assert!(body["endpoints"]["/api/contact"].is_string());
    assert!(body["endpoints"]["/api/career"].is_string());
    assert_eq!(body["endpoints"].as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(&format!("{}/api/unknown", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 404);
}
