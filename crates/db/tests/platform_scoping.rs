//! Integration tests for platform ownership scoping and lifecycle.
//!
//! Every repository read is scoped by `(id, user_id)`: another user's
//! platform must be indistinguishable from a missing one.

use assert_matches::assert_matches;
use serde_json::json;
use sqlx::PgPool;

use shopsync_core::credentials::{PlatformCredentials, PlatformType};
use shopsync_db::models::platform::{CreatePlatform, PlatformStatus};
use shopsync_db::repositories::PlatformRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn shopify_platform(name: &str, shop_domain: &str) -> CreatePlatform {
    CreatePlatform {
        platform_type: PlatformType::Shopify,
        platform_name: name.to_string(),
        api_credentials: json!({ "shopDomain": shop_domain, "accessToken": "shpat_test" }),
    }
}

fn woo_platform(name: &str, store_url: &str) -> CreatePlatform {
    CreatePlatform {
        platform_type: PlatformType::Woocommerce,
        platform_name: name.to_string(),
        api_credentials: json!({
            "storeUrl": store_url,
            "consumerKey": "ck_test",
            "consumerSecret": "cs_test"
        }),
    }
}

// ---------------------------------------------------------------------------
// Ownership scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn another_users_platform_is_invisible(pool: PgPool) {
    let theirs = PlatformRepo::create(&pool, 2, &shopify_platform("Their shop", "theirs"))
        .await
        .unwrap();

    // Reads with the wrong user see nothing.
    let found = PlatformRepo::find_by_id(&pool, theirs.id, 1).await.unwrap();
    assert!(found.is_none());

    // Writes with the wrong user touch nothing.
    let removed = PlatformRepo::delete(&pool, theirs.id, 1).await.unwrap();
    assert!(!removed);
    assert!(PlatformRepo::find_by_id(&pool, theirs.id, 2)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../migrations")]
async fn listing_is_per_user(pool: PgPool) {
    PlatformRepo::create(&pool, 1, &shopify_platform("Mine", "mine"))
        .await
        .unwrap();
    PlatformRepo::create(&pool, 2, &shopify_platform("Theirs", "theirs"))
        .await
        .unwrap();

    let mine = PlatformRepo::find_by_user(&pool, 1).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].platform_name, "Mine");
}

// ---------------------------------------------------------------------------
// Active set ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn active_platforms_come_back_in_ascending_id_order(pool: PgPool) {
    let a = PlatformRepo::create(&pool, 1, &shopify_platform("A", "shop-a"))
        .await
        .unwrap();
    let b = PlatformRepo::create(&pool, 1, &woo_platform("B", "https://b.example.com"))
        .await
        .unwrap();
    let c = PlatformRepo::create(&pool, 1, &shopify_platform("C", "shop-c"))
        .await
        .unwrap();

    PlatformRepo::set_status(&pool, b.id, 1, PlatformStatus::Disabled)
        .await
        .unwrap();

    let active = PlatformRepo::find_active_by_user(&pool, 1).await.unwrap();
    let ids: Vec<i64> = active.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a.id, c.id]);
}

// ---------------------------------------------------------------------------
// Credential decoding and identity lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn stored_credentials_decode_into_typed_bundle(pool: PgPool) {
    let platform = PlatformRepo::create(&pool, 1, &shopify_platform("Main", "acme"))
        .await
        .unwrap();

    assert_matches!(platform.credentials().unwrap(), PlatformCredentials::Shopify(creds) => {
        assert_eq!(creds.shop_domain, "acme");
        assert!(creds.location_id.is_none());
    });
}

#[sqlx::test(migrations = "../../migrations")]
async fn webhook_identity_lookups_match_stored_credentials(pool: PgPool) {
    PlatformRepo::create(&pool, 1, &shopify_platform("Main", "acme"))
        .await
        .unwrap();
    PlatformRepo::create(&pool, 1, &woo_platform("Woo", "https://shop.example.com"))
        .await
        .unwrap();

    let by_domain = PlatformRepo::find_by_shop_domain(&pool, "acme").await.unwrap();
    assert!(by_domain.is_some());
    assert!(PlatformRepo::find_by_shop_domain(&pool, "nobody")
        .await
        .unwrap()
        .is_none());

    let by_url = PlatformRepo::find_by_store_url(&pool, "https://shop.example.com")
        .await
        .unwrap();
    assert!(by_url.is_some());
}

// ---------------------------------------------------------------------------
// Credential rotation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn rotating_credentials_keeps_identity(pool: PgPool) {
    let platform = PlatformRepo::create(&pool, 1, &shopify_platform("Main", "acme"))
        .await
        .unwrap();

    let rotated = PlatformRepo::update_credentials(
        &pool,
        platform.id,
        1,
        &json!({ "shopDomain": "acme", "accessToken": "shpat_rotated" }),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(rotated.id, platform.id);
    assert_eq!(rotated.platform_type, "shopify");
    assert_matches!(rotated.credentials().unwrap(), PlatformCredentials::Shopify(creds) => {
        assert_eq!(creds.access_token, "shpat_rotated");
    });
}
