use super::*;
use crate::{
    model::status::{Channel, OtpPurpose},
    server::{
        data::{
            notification_log::NotificationLogRepository, permission::PermissionRepository,
            role::RoleRepository,
        },
        middleware::auth::Permission,
        model::admin::AdminUser,
        service::{
            matching::MatchingService, notification::Notifier, otp::OtpService,
            verification::VerificationService,
        },
        util::password::hash_password,
    },
};
use std::collections::BTreeSet;
use test_utils::factory;

async fn role_keys(db: &DatabaseConnection, name: &str) -> Result<BTreeSet<String>, AppError> {
    let repo = RoleRepository::new(db);
    let role = repo.find_by_name(name).await?.unwrap();

    Ok(repo.get_permission_keys(&[role.id]).await?.into_iter().collect())
}

/// Tests the seeded permission catalogue and default roles.
///
/// Expected: one permission row per guarded key, Super Admin holding all of them, Admin
/// all but access management and Verifier only the review permissions
#[tokio::test]
async fn seeds_roles_with_expected_permissions() -> Result<(), AppError> {
    let db = migrated_db().await?;

    let all: BTreeSet<String> = Permission::ALL.iter().map(|p| p.key().to_string()).collect();
    let seeded: BTreeSet<String> = PermissionRepository::new(&db)
        .get_all()
        .await?
        .into_iter()
        .map(|p| p.key)
        .collect();
    assert_eq!(seeded, all);

    assert_eq!(role_keys(&db, "Super Admin").await?, all);

    let mut admin_keys = all.clone();
    admin_keys.remove("roles.manage");
    admin_keys.remove("admins.manage");
    assert_eq!(role_keys(&db, "Admin").await?, admin_keys);

    let verifier_keys: BTreeSet<String> = ["dashboard.view", "drivers.view", "drivers.verify"]
        .into_iter()
        .map(str::to_string)
        .collect();
    assert_eq!(role_keys(&db, "Verifier").await?, verifier_keys);

    let levels: Vec<(String, i32)> = RoleRepository::new(&db)
        .get_all()
        .await?
        .into_iter()
        .map(|r| (r.role.name, r.role.level))
        .collect();
    assert!(levels.contains(&("Super Admin".to_string(), 100)));
    assert!(levels.contains(&("Admin".to_string(), 50)));
    assert!(levels.contains(&("Verifier".to_string(), 10)));

    Ok(())
}

/// Tests every seeded template with the variables its sending service provides.
///
/// Expected: approval, match, rejection and both OTP messages delivered with every
/// placeholder filled in, the email code by email
#[tokio::test]
async fn seeded_templates_fill_every_placeholder() -> Result<(), AppError> {
    let db = migrated_db().await?;
    let admin = factory::admin_user::AdminUserFactory::new(&db)
        .password_hash(hash_password("reviewer-pass")?)
        .build()
        .await?;
    let admin = AdminUser::from_entity(admin);
    let driver = factory::driver::DriverFactory::new(&db)
        .name("Ada", "Obi")
        .email("ada@example.com")
        .phone("+2348011112222")
        .with_kyc_details()
        .kyc_step(3)
        .verification_status("pending")
        .build()
        .await?;
    let company = factory::create_company(&db).await?;
    factory::company_request::CompanyRequestFactory::new(&db, company.id)
        .title("Airport shuttle")
        .build()
        .await?;

    let recorder = RecordingProvider::default();
    let notifier = Notifier::new(db.clone(), &recording_providers(&recorder));
    let verification = VerificationService::new(&db, &notifier);

    verification.approve(&admin, driver.id, "reviewer-pass").await?;
    wait_for_sent(&recorder, 1).await;

    MatchingService::new(&db, &notifier).auto_match(None).await?;
    wait_for_sent(&recorder, 2).await;

    verification
        .reject(&admin, driver.id, "reviewer-pass", "Blurry selfie".to_string())
        .await?;
    wait_for_sent(&recorder, 3).await;

    let otp = OtpService::new(&db, &notifier);
    let sms_code = otp
        .issue(&driver.phone, Channel::Sms, OtpPurpose::PhoneVerification)
        .await?;
    wait_for_sent(&recorder, 4).await;
    let email_code = otp
        .issue(&driver.email, Channel::Email, OtpPurpose::EmailVerification)
        .await?;
    let sent = wait_for_sent(&recorder, 5).await;

    assert_eq!(sent.len(), 5);
    for (_, subject, body) in &sent {
        assert!(!body.contains("{{"), "unfilled placeholder in {:?}", body);
        assert!(!subject.as_deref().unwrap_or_default().contains("{{"));
    }

    assert!(sent[0].2.starts_with("Hi Ada, your driver account has been verified"));
    assert!(sent[1].2.contains("matched to \"Airport shuttle\" in Lagos"));
    assert!(sent[2].2.contains("not approved: Blurry selfie"));
    assert_eq!(sent[3].0, "+2348011112222");
    assert!(sent[3].2.contains(&sms_code.code));
    assert_eq!(sent[4].0, "ada@example.com");
    assert_eq!(sent[4].1.as_deref(), Some("Your verification code"));
    assert!(sent[4].2.starts_with("Hello Ada,"));
    assert!(sent[4].2.contains(&email_code.code));

    Ok(())
}

/// Tests that delivered one-time codes never reach the notification log.
///
/// Expected: both OTP log rows show a masked code
#[tokio::test]
async fn notification_log_masks_one_time_codes() -> Result<(), AppError> {
    let db = migrated_db().await?;

    let recorder = RecordingProvider::default();
    let notifier = Notifier::new(db.clone(), &recording_providers(&recorder));
    let otp = OtpService::new(&db, &notifier);
    let sms_code = otp
        .issue("+2348033334444", Channel::Sms, OtpPurpose::PhoneVerification)
        .await?;
    let email_code = otp
        .issue("ada@example.com", Channel::Email, OtpPurpose::EmailVerification)
        .await?;
    wait_for_sent(&recorder, 2).await;

    let log_repo = NotificationLogRepository::new(&db);
    let mut log = log_repo.get_paginated(0, 10).await?;
    for _ in 0..200 {
        if log.total >= 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        log = log_repo.get_paginated(0, 10).await?;
    }

    assert_eq!(log.total, 2);
    for entry in &log.items {
        assert!(entry.body.contains("******"), "code not masked: {}", entry.body);
        assert!(!entry.body.contains(&sms_code.code));
        assert!(!entry.body.contains(&email_code.code));
    }
    let delivered: Vec<String> = recorder.sent().into_iter().map(|(_, _, body)| body).collect();
    assert!(delivered.iter().any(|b| b.contains(&sms_code.code)));
    assert!(delivered.iter().any(|b| b.contains(&email_code.code)));

    Ok(())
}
