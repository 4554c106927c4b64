use serde_json::json;

use crate::helpers::spawn_app;

#[actix_web::test]
async fn notification_with_other_action_is_acknowledged() {
    let app = spawn_app().await;

    let client = reqwest::Client::new();
    let response = client
        .post(&format!("{}/checkout/notification", &app.address))
        .json(&json!({
            "action": "payment.created",
            "data": { "id": "456" }
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response.");
    assert_eq!(body["status"], json!(true));
    assert!(body["customer_message"]
        .as_str()
        .unwrap()
        .contains("Ignored"));
    assert!(body["data"].is_null());
}

#[actix_web::test]
async fn notification_with_malformed_body_is_rejected() {
    let app = spawn_app().await;

    let client = reqwest::Client::new();
    let response = client
        .post(&format!("{}/checkout/notification", &app.address))
        .json(&json!({ "action": "payment.updated" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response.");
    assert_eq!(body["status"], json!(false));
    assert_eq!(body["code"], json!("400"));
}
