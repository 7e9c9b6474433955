use crate::test_context::TestContext;
use crate::tests::test_photos::create_photo;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use reqwest::StatusCode;
use serde_json::{Value, json};

pub async fn create_album(ctx: &TestContext, token: &str, title: &str) -> Result<String> {
    let response = ctx
        .http_client
        .post(format!("{}/albums", ctx.base_url))
        .bearer_auth(token)
        .json(&json!({"title": title}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await?;
    body["data"]["id"]
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| eyre!("create album response missing id"))
}

pub async fn test_album_lifecycle(ctx: &TestContext) -> Result<()> {
    let token = ctx.token_for("alice")?;
    let album_id = create_album(ctx, &token, "Lifecycle Test Album").await?;

    // List: the album shows up as owned, not shared.
    let body: Value = ctx
        .http_client
        .get(format!("{}/albums", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    let owned = body["data"]["owned"].as_array().expect("owned list");
    assert!(owned.iter().any(|a| a["id"] == album_id.as_str()));
    assert_eq!(body["data"]["sharedWithMe"].as_array().map(Vec::len), Some(0));

    // Details: empty photo list, shares visible to the owner.
    let details: Value = ctx
        .http_client
        .get(format!("{}/albums/{album_id}", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(details["data"]["title"], "Lifecycle Test Album");
    assert_eq!(details["data"]["photos"].as_array().map(Vec::len), Some(0));
    assert!(details["data"]["shares"].is_array());

    // Update title and description.
    let updated: Value = ctx
        .http_client
        .patch(format!("{}/albums/{album_id}", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"title": "Renamed", "description": "After the trip"}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(updated["data"]["title"], "Renamed");
    assert_eq!(updated["data"]["description"], "After the trip");

    // An explicit null clears the description; leaving it out keeps it.
    let cleared: Value = ctx
        .http_client
        .patch(format!("{}/albums/{album_id}", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"description": null}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(cleared["data"]["title"], "Renamed");
    assert!(cleared["data"]["description"].is_null());

    // Delete, then the album is gone.
    let response = ctx
        .http_client
        .delete(format!("{}/albums/{album_id}", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .http_client
        .get(format!("{}/albums/{album_id}", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

pub async fn test_membership_add_is_idempotent(ctx: &TestContext) -> Result<()> {
    let token = ctx.token_for("ingrid")?;
    let album_id = create_album(ctx, &token, "Membership").await?;
    let p1 = create_photo(ctx, &token, "one.jpg").await?;
    let p2 = create_photo(ctx, &token, "two.jpg").await?;

    // First add: both photos are new members.
    let body: Value = ctx
        .http_client
        .post(format!("{}/albums/{album_id}/photos", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"photoIds": [p1, p2]}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["added"], 2);
    assert_eq!(body["data"]["skipped"], 0);

    // Re-adding one of them succeeds but changes nothing.
    let body: Value = ctx
        .http_client
        .post(format!("{}/albums/{album_id}/photos", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"photoIds": [p1]}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["added"], 0);
    assert_eq!(body["data"]["skipped"], 1);

    // Remove, then a second remove is a miss.
    let response = ctx
        .http_client
        .delete(format!("{}/albums/{album_id}/photos/{p1}", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .http_client
        .delete(format!("{}/albums/{album_id}/photos/{p1}", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Membership removal never deletes the photo itself.
    let response = ctx
        .http_client
        .get(format!("{}/photos/{p1}", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

pub async fn test_sharing_grants_visibility(ctx: &TestContext) -> Result<()> {
    let owner = ctx.token_for("sonja")?;
    let grantee = ctx.token_for("greta")?;
    let album_id = create_album(ctx, &owner, "Shared Album").await?;

    // Grantee resolved by username before any share: invisible.
    let response = ctx
        .http_client
        .get(format!("{}/albums/{album_id}", ctx.base_url))
        .bearer_auth(&grantee)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .http_client
        .post(format!("{}/albums/{album_id}/shares", ctx.base_url))
        .bearer_auth(&owner)
        .json(&json!({"granteeUsername": "greta", "permission": "view"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Now the grantee can read it, without seeing the share list.
    let details: Value = ctx
        .http_client
        .get(format!("{}/albums/{album_id}", ctx.base_url))
        .bearer_auth(&grantee)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(details["data"]["title"], "Shared Album");
    assert!(details["data"].get("shares").is_none());

    // And it appears under sharedWithMe.
    let listing: Value = ctx
        .http_client
        .get(format!("{}/albums", ctx.base_url))
        .bearer_auth(&grantee)
        .send()
        .await?
        .json()
        .await?;
    let shared = listing["data"]["sharedWithMe"].as_array().expect("shared list");
    assert!(shared.iter().any(|a| a["id"] == album_id.as_str()));
    Ok(())
}

pub async fn test_stranger_gets_not_found(ctx: &TestContext) -> Result<()> {
    let owner = ctx.token_for("nina")?;
    let stranger = ctx.token_for("saul")?;
    let album_id = create_album(ctx, &owner, "Private").await?;

    // Reads and mutations all answer 404, never 403.
    let read = ctx
        .http_client
        .get(format!("{}/albums/{album_id}", ctx.base_url))
        .bearer_auth(&stranger)
        .send()
        .await?;
    assert_eq!(read.status(), StatusCode::NOT_FOUND);

    let mutate = ctx
        .http_client
        .patch(format!("{}/albums/{album_id}", ctx.base_url))
        .bearer_auth(&stranger)
        .json(&json!({"title": "Hijacked"}))
        .send()
        .await?;
    assert_eq!(mutate.status(), StatusCode::NOT_FOUND);

    let delete = ctx
        .http_client
        .delete(format!("{}/albums/{album_id}", ctx.base_url))
        .bearer_auth(&stranger)
        .send()
        .await?;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    Ok(())
}

pub async fn test_view_grantee_cannot_mutate(ctx: &TestContext) -> Result<()> {
    let owner = ctx.token_for("viola")?;
    let viewer = ctx.token_for("victor")?;
    let album_id = create_album(ctx, &owner, "Read Only").await?;
    let owner_photo = create_photo(ctx, &owner, "hers.jpg").await?;
    let viewer_photo = create_photo(ctx, &viewer, "mine.jpg").await?;

    let response = ctx
        .http_client
        .post(format!("{}/albums/{album_id}/shares", ctx.base_url))
        .bearer_auth(&owner)
        .json(&json!({"granteeUsername": "victor", "permission": "view"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // View access does not include membership changes.
    let response = ctx
        .http_client
        .post(format!("{}/albums/{album_id}/photos", ctx.base_url))
        .bearer_auth(&viewer)
        .json(&json!({"photoIds": [owner_photo]}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Upgrading to edit unlocks membership, nothing else.
    let response = ctx
        .http_client
        .post(format!("{}/albums/{album_id}/shares", ctx.base_url))
        .bearer_auth(&owner)
        .json(&json!({"granteeUsername": "victor", "permission": "edit"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = ctx
        .http_client
        .post(format!("{}/albums/{album_id}/photos", ctx.base_url))
        .bearer_auth(&viewer)
        .json(&json!({"photoIds": [owner_photo]}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["added"], 1);

    let response = ctx
        .http_client
        .patch(format!("{}/albums/{album_id}", ctx.base_url))
        .bearer_auth(&viewer)
        .json(&json!({"title": "Renamed by editor"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Even with edit rights, memberships may only reference the album
    // owner's photos; the grantee's own photo reads as missing.
    let response = ctx
        .http_client
        .post(format!("{}/albums/{album_id}/photos", ctx.base_url))
        .bearer_auth(&viewer)
        .json(&json!({"photoIds": [viewer_photo]}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
