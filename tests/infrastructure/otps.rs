use crate::common;

use bizdir::domain::otp::{NewOtp, OtpPurpose, OtpRepository};
use bizdir::domain::principal::PrincipalKind;
use bizdir::infrastructure::repositories::otps::PostgresOtpRepository;
use serial_test::serial;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};

fn new_otp(kind: PrincipalKind, code: &str, issued_at: OffsetDateTime) -> NewOtp {
    NewOtp {
        principal_kind: kind,
        address: "ada@example.com".to_string(),
        code: code.to_string(),
        purpose: OtpPurpose::Registration,
        issued_at,
    }
}

#[tokio::test]
#[serial]
async fn test_find_live_is_scoped_by_kind() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = PostgresOtpRepository::new(pool.clone());
    let now = OffsetDateTime::now_utc();

    repo.create(new_otp(PrincipalKind::User, "USERCODE", now))
        .await
        .unwrap();

    let live = repo
        .find_live(PrincipalKind::User, "ada@example.com", OtpPurpose::Registration)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(live.code, "USERCODE");

    let other_kind = repo
        .find_live(
            PrincipalKind::Business,
            "ada@example.com",
            OtpPurpose::Registration,
        )
        .await
        .unwrap();
    assert!(other_kind.is_none());

    let other_purpose = repo
        .find_live(PrincipalKind::User, "ada@example.com", OtpPurpose::PasswordReset)
        .await
        .unwrap();
    assert!(other_purpose.is_none());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_supersede_hides_older_codes() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = PostgresOtpRepository::new(pool.clone());
    let now = OffsetDateTime::now_utc();

    repo.create(new_otp(PrincipalKind::User, "FIRST001", now - Duration::minutes(1)))
        .await
        .unwrap();
    let superseded = repo
        .supersede(
            PrincipalKind::User,
            "ada@example.com",
            OtpPurpose::Registration,
            now,
        )
        .await
        .unwrap();
    assert_eq!(superseded, 1);
    repo.create(new_otp(PrincipalKind::User, "SECOND02", now))
        .await
        .unwrap();

    let live = repo
        .find_live(PrincipalKind::User, "ada@example.com", OtpPurpose::Registration)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(live.code, "SECOND02");

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_consume_has_single_winner() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = Arc::new(PostgresOtpRepository::new(pool.clone()));
    let now = OffsetDateTime::now_utc();
    let id = repo
        .create(new_otp(PrincipalKind::Business, "RACE0001", now))
        .await
        .unwrap()
        .id;

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.consume(id, now).await })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    let live = repo
        .find_live(
            PrincipalKind::Business,
            "ada@example.com",
            OtpPurpose::Registration,
        )
        .await
        .unwrap();
    assert!(live.is_none());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_delete_by_address() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = PostgresOtpRepository::new(pool.clone());
    let now = OffsetDateTime::now_utc();

    repo.create(new_otp(PrincipalKind::User, "AAAA0001", now))
        .await
        .unwrap();
    repo.create(new_otp(PrincipalKind::Business, "BBBB0002", now))
        .await
        .unwrap();

    let deleted = repo
        .delete_by_address(PrincipalKind::User, "ada@example.com")
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert!(
        repo.find_live(
            PrincipalKind::Business,
            "ada@example.com",
            OtpPurpose::Registration
        )
        .await
        .unwrap()
        .is_some()
    );

    common::cleanup_test_db(&pool).await;
}
