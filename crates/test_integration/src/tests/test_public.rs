use crate::test_context::TestContext;
use crate::tests::test_albums::create_album;
use crate::tests::test_photos::create_photo;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn issue_link(ctx: &TestContext, token: &str, album_id: &str) -> Result<String> {
    let response = ctx
        .http_client
        .post(format!("{}/albums/{album_id}/public-link", ctx.base_url))
        .bearer_auth(token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await?;
    let token_value = body["data"]["publicToken"]
        .as_str()
        .ok_or_else(|| eyre!("response missing public token"))?;
    assert_eq!(token_value.len(), 64);
    assert!(token_value.bytes().all(|b| b.is_ascii_hexdigit()));
    Ok(token_value.to_owned())
}

async fn fetch_public(ctx: &TestContext, token: &str) -> Result<reqwest::Response> {
    // Deliberately no bearer token: possession of the link is the whole
    // credential.
    Ok(ctx
        .http_client
        .get(format!("{}/public/albums/{token}", ctx.base_url))
        .send()
        .await?)
}

pub async fn test_public_link_round_trip(ctx: &TestContext) -> Result<()> {
    let owner = ctx.token_for("paula")?;
    let album_id = create_album(ctx, &owner, "Public Trip").await?;
    let photo_id = create_photo(ctx, &owner, "beach.jpg").await?;
    ctx.http_client
        .post(format!("{}/albums/{album_id}/photos", ctx.base_url))
        .bearer_auth(&owner)
        .json(&json!({"photoIds": [photo_id]}))
        .send()
        .await?;

    let link_token = issue_link(ctx, &owner, &album_id).await?;

    let response = fetch_public(ctx, &link_token).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["data"]["title"], "Public Trip");

    let photos = body["data"]["photos"].as_array().expect("public photos");
    assert_eq!(photos.len(), 1);
    assert!(photos[0]["downloadUrl"].as_str().is_some());
    // The public projection stays narrow.
    assert!(photos[0].get("storageKey").is_none());
    assert!(photos[0].get("userId").is_none());
    assert!(body["data"].get("ownerId").is_none());
    assert!(body["data"].get("shares").is_none());
    Ok(())
}

pub async fn test_regenerate_supersedes_old_token(ctx: &TestContext) -> Result<()> {
    let owner = ctx.token_for("rita")?;
    let album_id = create_album(ctx, &owner, "Rotating").await?;

    let first = issue_link(ctx, &owner, &album_id).await?;
    let second = issue_link(ctx, &owner, &album_id).await?;
    assert_ne!(first, second);

    assert_eq!(
        fetch_public(ctx, &first).await?.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(fetch_public(ctx, &second).await?.status(), StatusCode::OK);
    Ok(())
}

pub async fn test_revoked_and_malformed_tokens(ctx: &TestContext) -> Result<()> {
    let owner = ctx.token_for("rebecca")?;
    let album_id = create_album(ctx, &owner, "Revocable").await?;
    let link_token = issue_link(ctx, &owner, &album_id).await?;

    let response = ctx
        .http_client
        .delete(format!("{}/albums/{album_id}/public-link", ctx.base_url))
        .bearer_auth(&owner)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        fetch_public(ctx, &link_token).await?.status(),
        StatusCode::NOT_FOUND
    );

    // Revoking again is still fine.
    let response = ctx
        .http_client
        .delete(format!("{}/albums/{album_id}/public-link", ctx.base_url))
        .bearer_auth(&owner)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Wrong length and non-hex are rejected before any lookup.
    for malformed in ["abc", &"g".repeat(64)] {
        assert_eq!(
            fetch_public(ctx, malformed).await?.status(),
            StatusCode::BAD_REQUEST
        );
    }

    // A well-formed token nobody issued reads as missing.
    assert_eq!(
        fetch_public(ctx, &"0".repeat(64)).await?.status(),
        StatusCode::NOT_FOUND
    );
    Ok(())
}

pub async fn test_expired_token_is_not_found(ctx: &TestContext) -> Result<()> {
    let owner = ctx.token_for("edgar")?;
    let album_id = create_album(ctx, &owner, "Expiring").await?;
    let link_token = issue_link(ctx, &owner, &album_id).await?;
    assert_eq!(fetch_public(ctx, &link_token).await?.status(), StatusCode::OK);

    // Push the expiry into the past behind the API's back.
    sqlx::query("UPDATE album SET public_expires_at = now() - INTERVAL '1 second' WHERE id = $1")
        .bind(&album_id)
        .execute(&ctx.pool)
        .await?;

    assert_eq!(
        fetch_public(ctx, &link_token).await?.status(),
        StatusCode::NOT_FOUND
    );
    Ok(())
}
