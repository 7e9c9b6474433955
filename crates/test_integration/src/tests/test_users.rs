use crate::test_context::TestContext;
use color_eyre::Result;
use reqwest::StatusCode;
use serde_json::{Value, json};

pub async fn test_me_creates_user_on_first_sight(ctx: &TestContext) -> Result<()> {
    let token = ctx.token_for("mallory")?;

    let response = ctx
        .http_client
        .get(format!("{}/users/me", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "mallory");
    assert_eq!(body["data"]["email"], "mallory@test.local");
    // The provider subject never leaks into responses.
    assert!(body["data"].get("authProviderId").is_none());

    // A second call resolves the same user instead of creating another.
    let again: Value = ctx
        .http_client
        .get(format!("{}/users/me", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(again["data"]["id"], body["data"]["id"]);
    Ok(())
}

pub async fn test_update_profile(ctx: &TestContext) -> Result<()> {
    let token = ctx.token_for("penny")?;

    let response = ctx
        .http_client
        .patch(format!("{}/users/me", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "displayName": "Penny Lane",
            "profile": {"theme": "dark"}
        }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["data"]["displayName"], "Penny Lane");
    assert_eq!(body["data"]["profile"]["theme"], "dark");

    // Empty display names are rejected.
    let response = ctx
        .http_client
        .patch(format!("{}/users/me", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"displayName": "   "}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

pub async fn test_user_stats(ctx: &TestContext) -> Result<()> {
    let token = ctx.token_for("statler")?;

    let stats: Value = ctx
        .http_client
        .get(format!("{}/users/me/stats", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(stats["data"]["photoCount"], 0);
    assert_eq!(stats["data"]["totalBytes"], 0);

    // Register one upload intent, stats should follow.
    let response = ctx
        .http_client
        .post(format!("{}/photos/uploads", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"fileName": "sunset.jpg", "fileSize": 2048}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let stats: Value = ctx
        .http_client
        .get(format!("{}/users/me/stats", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(stats["data"]["photoCount"], 1);
    assert_eq!(stats["data"]["totalBytes"], 2048);
    Ok(())
}
