use chrono::Duration;

use signage_auth::domain::clock::Clock;
use signage_auth::domain::types::{OTP_RANGE, OTP_TTL_SECS};
use signage_auth::error::AuthServiceError;
use signage_auth::infra::password::BcryptHasher;
use signage_auth::usecase::reset::{
    RedeemResetInput, RedeemResetUseCase, RequestResetInput, RequestResetUseCase,
};
use signage_auth::usecase::session::{LoginInput, LoginUseCase};

use crate::helpers::{
    FailingMailer, FakeHasher, MockStore, RacingHasher, RecordingMailer, SlowHasher,
    TEST_JWT_SECRET, TestClock, fake_hash, test_admin, test_code,
};

const EMAIL: &str = "a@b.com";

fn request_usecase(
    store: &MockStore,
    mailer: &RecordingMailer,
    clock: &TestClock,
) -> RequestResetUseCase<MockStore, MockStore, RecordingMailer> {
    RequestResetUseCase {
        credentials: store.clone(),
        otps: store.clone(),
        mailer: mailer.clone(),
        clock: clock.shared(),
    }
}

fn redeem_usecase(store: &MockStore, clock: &TestClock) -> RedeemResetUseCase<MockStore, FakeHasher> {
    RedeemResetUseCase {
        otps: store.clone(),
        hasher: FakeHasher,
        clock: clock.shared(),
    }
}

fn redeem(email: &str, code: &str, new_password: &str) -> RedeemResetInput {
    RedeemResetInput {
        email: email.to_owned(),
        code: code.to_owned(),
        new_password: new_password.to_owned(),
    }
}

async fn request_code(store: &MockStore, clock: &TestClock) -> String {
    let mailer = RecordingMailer::default();
    request_usecase(store, &mailer, clock)
        .execute(RequestResetInput {
            email: EMAIL.to_owned(),
        })
        .await
        .unwrap();
    mailer.sent().pop().unwrap().1
}

// ── RequestReset ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_persist_and_mail_a_six_digit_code() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let mailer = RecordingMailer::default();
    let clock = TestClock::default();

    let out = request_usecase(&store, &mailer, &clock)
        .execute(RequestResetInput {
            email: format!("  {EMAIL} "),
        })
        .await
        .unwrap();
    assert_eq!(out.email, EMAIL);

    let codes = store.codes();
    assert_eq!(codes.len(), 1, "expected exactly one reset code");
    let code = &codes[0];
    assert_eq!(code.email, EMAIL);
    assert!(OTP_RANGE.contains(&code.code.parse::<u32>().unwrap()));
    assert_eq!(code.created_at, clock.now());
    assert_eq!(
        code.expires_at,
        clock.now() + Duration::seconds(OTP_TTL_SECS)
    );
    assert!(code.used_at.is_none());

    assert_eq!(mailer.sent(), vec![(EMAIL.to_owned(), code.code.clone())]);
}

#[tokio::test]
async fn should_fail_not_found_for_unknown_email_without_creating_a_code() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let mailer = RecordingMailer::default();
    let clock = TestClock::default();

    let result = request_usecase(&store, &mailer, &clock)
        .execute(RequestResetInput {
            email: "nobody@example.com".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::AdminNotFound)),
        "expected AdminNotFound, got {result:?}"
    );
    assert!(store.codes().is_empty());
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn should_reject_malformed_email() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let mailer = RecordingMailer::default();
    let clock = TestClock::default();

    for email in ["", "a@b", "not an email", "@b.com"] {
        let result = request_usecase(&store, &mailer, &clock)
            .execute(RequestResetInput {
                email: email.to_owned(),
            })
            .await;
        assert!(
            matches!(result, Err(AuthServiceError::InvalidInput(_))),
            "expected InvalidInput for {email:?}, got {result:?}"
        );
    }
    assert!(store.codes().is_empty());
}

#[tokio::test]
async fn should_report_delivery_failure_and_keep_the_code() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let clock = TestClock::default();

    let uc = RequestResetUseCase {
        credentials: store.clone(),
        otps: store.clone(),
        mailer: FailingMailer,
        clock: clock.shared(),
    };
    let result = uc
        .execute(RequestResetInput {
            email: EMAIL.to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::DeliveryFailed)),
        "expected DeliveryFailed, got {result:?}"
    );
    assert_eq!(store.codes().len(), 1);
}

// ── RedeemReset ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reset_password_then_allow_login_with_it() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let clock = TestClock::default();
    let code = request_code(&store, &clock).await;

    clock.advance(Duration::minutes(9));
    let redeem_uc = RedeemResetUseCase {
        otps: store.clone(),
        hasher: BcryptHasher { cost: 4 },
        clock: clock.shared(),
    };
    redeem_uc
        .execute(redeem(EMAIL, &code, "newpass123"))
        .await
        .unwrap();

    assert_ne!(store.password_hash(EMAIL).unwrap(), fake_hash("oldpass1"));
    assert_eq!(store.codes()[0].used_at, Some(clock.now()));

    let login = LoginUseCase {
        credentials: store.clone(),
        hasher: BcryptHasher { cost: 4 },
        clock: clock.shared(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    login
        .execute(LoginInput {
            email: EMAIL.to_owned(),
            password: "newpass123".to_owned(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn should_reject_second_redemption_of_the_same_code() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let clock = TestClock::default();
    let code = request_code(&store, &clock).await;
    let uc = redeem_usecase(&store, &clock);

    uc.execute(redeem(EMAIL, &code, "newpass123")).await.unwrap();
    let result = uc.execute(redeem(EMAIL, &code, "another123")).await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidOrExpiredCode)),
        "expected InvalidOrExpiredCode, got {result:?}"
    );
    assert_eq!(store.password_hash(EMAIL).unwrap(), fake_hash("newpass123"));
}

#[tokio::test]
async fn should_reject_expired_code_even_when_it_matches() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let clock = TestClock::default();
    let code = request_code(&store, &clock).await;

    // Expiry is exclusive: at exactly created_at + 10min the code is gone.
    clock.advance(Duration::seconds(OTP_TTL_SECS));
    let result = redeem_usecase(&store, &clock)
        .execute(redeem(EMAIL, &code, "newpass123"))
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidOrExpiredCode)),
        "expected InvalidOrExpiredCode, got {result:?}"
    );
    assert_eq!(store.password_hash(EMAIL).unwrap(), fake_hash("oldpass1"));
    assert!(store.codes()[0].used_at.is_none());
}

#[tokio::test]
async fn should_reject_code_issued_for_another_email() {
    let store = MockStore::with_credentials(vec![
        test_admin(EMAIL, "oldpass1"),
        test_admin("c@d.com", "otherpw1"),
    ]);
    let clock = TestClock::default();
    let code = request_code(&store, &clock).await;

    let result = redeem_usecase(&store, &clock)
        .execute(redeem("c@d.com", &code, "newpass123"))
        .await;

    assert!(matches!(result, Err(AuthServiceError::InvalidOrExpiredCode)));
    assert_eq!(store.password_hash("c@d.com").unwrap(), fake_hash("otherpw1"));
}

#[tokio::test]
async fn should_keep_earlier_outstanding_codes_redeemable() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let clock = TestClock::default();
    let first = request_code(&store, &clock).await;
    clock.advance(Duration::minutes(1));
    let _second = request_code(&store, &clock).await;

    redeem_usecase(&store, &clock)
        .execute(redeem(EMAIL, &first, "newpass123"))
        .await
        .unwrap();

    assert_eq!(store.password_hash(EMAIL).unwrap(), fake_hash("newpass123"));
}

#[tokio::test]
async fn should_require_all_fields() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let clock = TestClock::default();
    let uc = redeem_usecase(&store, &clock);

    for input in [
        redeem("", "123456", "newpass123"),
        redeem(EMAIL, "", "newpass123"),
        redeem(EMAIL, "123456", ""),
    ] {
        let result = uc.execute(input).await;
        assert!(
            matches!(result, Err(AuthServiceError::InvalidInput(_))),
            "expected InvalidInput, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_reject_short_password_without_consuming_the_code() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let clock = TestClock::default();
    let code = request_code(&store, &clock).await;
    let uc = redeem_usecase(&store, &clock);

    let result = uc.execute(redeem(EMAIL, &code, "abc")).await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
    assert!(store.codes()[0].used_at.is_none());

    uc.execute(redeem(EMAIL, &code, "abcdef")).await.unwrap();
}

#[tokio::test]
async fn should_pick_newest_matching_code_when_strings_collide() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let clock = TestClock::default();
    let older = test_code(EMAIL, "424242", clock.now() - Duration::minutes(5));
    let newer = test_code(EMAIL, "424242", clock.now() - Duration::minutes(1));
    store.otps.lock().unwrap().extend([older.clone(), newer.clone()]);

    redeem_usecase(&store, &clock)
        .execute(redeem(EMAIL, "424242", "newpass123"))
        .await
        .unwrap();

    let codes = store.codes();
    let used: Vec<_> = codes.iter().filter(|c| c.used_at.is_some()).collect();
    assert_eq!(used.len(), 1);
    assert_eq!(used[0].id, newer.id);
}

#[tokio::test]
async fn should_reject_code_that_expires_while_hashing() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let clock = TestClock::default();
    let code = test_code(EMAIL, "135790", clock.now());
    store.otps.lock().unwrap().push(code.clone());

    // One second before expiry at lookup, one second past it once hashing is done.
    clock.advance(Duration::seconds(OTP_TTL_SECS - 1));
    let uc = RedeemResetUseCase {
        otps: store.clone(),
        hasher: SlowHasher {
            clock: clock.clone(),
            delay: Duration::seconds(2),
        },
        clock: clock.shared(),
    };
    let result = uc.execute(redeem(EMAIL, "135790", "newpass123")).await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidOrExpiredCode)),
        "expected InvalidOrExpiredCode, got {result:?}"
    );
    assert!(clock.now() > code.expires_at);
    assert_eq!(store.password_hash(EMAIL).unwrap(), fake_hash("oldpass1"));
    assert!(store.codes()[0].used_at.is_none());
}

#[tokio::test]
async fn should_stamp_used_at_with_the_time_of_consumption() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let clock = TestClock::default();
    let code = request_code(&store, &clock).await;

    let uc = RedeemResetUseCase {
        otps: store.clone(),
        hasher: SlowHasher {
            clock: clock.clone(),
            delay: Duration::seconds(3),
        },
        clock: clock.shared(),
    };
    uc.execute(redeem(EMAIL, &code, "newpass123")).await.unwrap();

    assert_eq!(store.codes()[0].used_at, Some(clock.now()));
}

#[tokio::test]
async fn should_let_only_one_of_two_interleaved_redemptions_win() {
    let store = MockStore::with_credentials(vec![test_admin(EMAIL, "oldpass1")]);
    let clock = TestClock::default();
    let code = request_code(&store, &clock).await;

    let uc = RedeemResetUseCase {
        otps: store.clone(),
        hasher: RacingHasher {
            store: store.clone(),
            clock: clock.clone(),
            email: EMAIL.to_owned(),
            code: code.clone(),
            winner_password: "winner123".to_owned(),
        },
        clock: clock.shared(),
    };
    let result = uc.execute(redeem(EMAIL, &code, "loser123")).await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidOrExpiredCode)),
        "expected InvalidOrExpiredCode, got {result:?}"
    );
    assert_eq!(store.password_hash(EMAIL).unwrap(), fake_hash("winner123"));
    let used: Vec<_> = store
        .codes()
        .into_iter()
        .filter(|c| c.used_at.is_some())
        .collect();
    assert_eq!(used.len(), 1);
}
