use crate::common;

use bizdir::domain::businesses::{
    BusinessRepository, BusinessType, NewBusiness, UpdateBusiness, VerificationStatus,
};
use bizdir::infrastructure::repositories::businesses::PostgresBusinessRepository;
use serial_test::serial;
use std::sync::Arc;
use uuid::Uuid;

fn new_business(email: &str) -> NewBusiness {
    NewBusiness {
        name: "Ada's Bakery".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$stub".to_string(),
        business_type: BusinessType::Product,
        contact_number: "+15550100".to_string(),
        address: "1 Main St".to_string(),
        description: None,
        category: Some("Bakery".to_string()),
        website: None,
    }
}

#[tokio::test]
#[serial]
async fn test_create_business_defaults() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = PostgresBusinessRepository::new(pool.clone());

    let created = repo.create(new_business("shop@example.com")).await.unwrap();
    assert_eq!(created.verification_status, VerificationStatus::Pending);
    assert_eq!(created.views, 0);
    assert!(created.photos.is_empty());
    assert!(created.verified_at.is_none());

    let found = repo
        .find_by_email("shop@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.category.as_deref(), Some("Bakery"));

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_update_business_fields() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = PostgresBusinessRepository::new(pool.clone());
    let created = repo.create(new_business("shop@example.com")).await.unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateBusiness {
                business_type: Some(BusinessType::Service),
                category: Some(None),
                photos: Some(vec!["https://cdn.example.com/1.jpg".to_string()]),
                verification_status: Some(VerificationStatus::Verified),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.business_type, BusinessType::Service);
    assert!(updated.category.is_none());
    assert_eq!(updated.photos, ["https://cdn.example.com/1.jpg"]);
    assert_eq!(updated.verification_status, VerificationStatus::Verified);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_record_view_is_atomic() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let repo = Arc::new(PostgresBusinessRepository::new(pool.clone()));
    let id = repo
        .create(new_business("shop@example.com"))
        .await
        .unwrap()
        .id;

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.record_view(id).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.views, 10);
    assert!(repo.record_view(Uuid::new_v4()).await.unwrap().is_none());

    common::cleanup_test_db(&pool).await;
}
