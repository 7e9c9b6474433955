use crate::test_context::TestContext;
use color_eyre::Result;
use color_eyre::eyre::bail;
use colored::Colorize;
use std::time::Instant;

pub mod test_albums;
pub mod test_public;
pub mod test_users;

macro_rules! run_test {
    ($ctx:expr, $failed:expr, $test:path) => {{
        let name = stringify!($test);
        let start = Instant::now();
        match $test($ctx).await {
            Ok(()) => println!(
                "{} {} ({:.2?})",
                " PASS ".on_green().black(),
                name,
                start.elapsed()
            ),
            Err(e) => {
                println!("{} {}\n{e:?}", " FAIL ".on_red().black(), name);
                $failed += 1;
            }
        }
    }};
}

pub async fn run_all(ctx: &TestContext) -> Result<()> {
    let mut failed = 0u32;

    // -- Root --
    run_test!(ctx, failed, test_root::test_health_endpoint);
    // -- Users --
    run_test!(ctx, failed, test_users::test_me_creates_user_on_first_sight);
    run_test!(ctx, failed, test_users::test_update_profile);
    run_test!(ctx, failed, test_users::test_user_stats);
    // -- Photos --
    run_test!(ctx, failed, test_photos::test_upload_intent_and_listing);
    run_test!(ctx, failed, test_photos::test_photo_delete);
    run_test!(ctx, failed, test_photos::test_foreign_photo_is_invisible);
    // -- Albums --
    run_test!(ctx, failed, test_albums::test_album_lifecycle);
    run_test!(ctx, failed, test_albums::test_membership_add_is_idempotent);
    run_test!(ctx, failed, test_albums::test_sharing_grants_visibility);
    run_test!(ctx, failed, test_albums::test_stranger_gets_not_found);
    run_test!(ctx, failed, test_albums::test_view_grantee_cannot_mutate);
    // -- Public links --
    run_test!(ctx, failed, test_public::test_public_link_round_trip);
    run_test!(ctx, failed, test_public::test_regenerate_supersedes_old_token);
    run_test!(ctx, failed, test_public::test_revoked_and_malformed_tokens);
    run_test!(ctx, failed, test_public::test_expired_token_is_not_found);

    if failed > 0 {
        bail!("{failed} integration test(s) failed");
    }
    println!("{}", "All integration tests passed.".green());
    Ok(())
}
