use uuid::Uuid;

use storefront_api::error::ApiError;
use storefront_api::usecase::auth::{
    AuthorizeAdminUseCase, ForgotPasswordInput, ForgotPasswordUseCase, LoginInput, LoginUseCase,
    RegisterInput, RegisterUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use storefront_api::usecase::order::ListBuyerOrdersUseCase;
use storefront_auth_types::identity::JwtSecret;
use storefront_auth_types::password::verify_password;
use storefront_auth_types::token::validate_token;
use storefront_domain::user::UserRole;

use crate::helpers::{
    MockOrderRepo, MockUserRepo, TEST_JWT_SECRET, TEST_PASSWORD, test_admin, test_order,
    test_user,
};

fn register_input(email: &str) -> RegisterInput {
    RegisterInput {
        name: Some("Grace".into()),
        email: Some(email.into()),
        password: Some("correct-horse".into()),
        phone: Some("555-0100".into()),
        address: Some("7 Harbour Rd".into()),
        answer: Some("cobol".into()),
    }
}

fn login_usecase(repo: MockUserRepo) -> LoginUseCase<MockUserRepo> {
    LoginUseCase {
        repo,
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
    }
}

// ── RegisterUseCase ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_customer_with_hashed_password() {
    let usecase = RegisterUseCase {
        repo: MockUserRepo::empty(),
    };
    let user = usecase
        .execute(register_input("grace@example.com"))
        .await
        .unwrap();

    assert_eq!(user.role, UserRole::Customer);
    assert_ne!(user.password, "correct-horse");
    assert!(verify_password("correct-horse", &user.password).unwrap());
    assert!(usecase.repo.get(user.id).is_some());
}

#[tokio::test]
async fn should_report_missing_registration_fields_in_order() {
    let usecase = RegisterUseCase {
        repo: MockUserRepo::empty(),
    };
    let cases = [
        (RegisterInput::default(), "Name is Required"),
        (
            RegisterInput {
                email: None,
                password: None,
                ..register_input("x@example.com")
            },
            "Email is Required",
        ),
        (
            RegisterInput {
                password: Some("  ".into()),
                ..register_input("x@example.com")
            },
            "Password is Required",
        ),
        (
            RegisterInput {
                phone: None,
                ..register_input("x@example.com")
            },
            "Phone no is Required",
        ),
        (
            RegisterInput {
                address: None,
                ..register_input("x@example.com")
            },
            "Address is Required",
        ),
        (
            RegisterInput {
                answer: None,
                ..register_input("x@example.com")
            },
            "Answer is Required",
        ),
    ];
    for (input, expected) in cases {
        let err = usecase.execute(input).await.unwrap_err();
        assert_eq!(err.to_string(), expected);
    }
    assert!(usecase.repo.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_already_registered_email() {
    let existing = test_user("taken@example.com");
    let usecase = RegisterUseCase {
        repo: MockUserRepo::new(vec![existing]),
    };
    let result = usecase.execute(register_input("taken@example.com")).await;
    assert!(matches!(result, Err(ApiError::EmailAlreadyRegistered)));
    assert_eq!(usecase.repo.users.lock().unwrap().len(), 1);
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_for_user_on_login() {
    let user = test_user("ada@example.com");
    let usecase = login_usecase(MockUserRepo::new(vec![user.clone()]));

    let output = usecase
        .execute(LoginInput {
            email: Some("ada@example.com".into()),
            password: Some(TEST_PASSWORD.into()),
        })
        .await
        .unwrap();

    assert_eq!(output.user.id, user.id);
    let info = validate_token(&output.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
}

#[tokio::test]
async fn should_reject_login_without_credentials() {
    let usecase = login_usecase(MockUserRepo::empty());
    let err = usecase
        .execute(LoginInput {
            email: Some("ada@example.com".into()),
            password: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
}

#[tokio::test]
async fn should_distinguish_unknown_email_from_wrong_password() {
    let usecase = login_usecase(MockUserRepo::new(vec![test_user("ada@example.com")]));

    let unknown = usecase
        .execute(LoginInput {
            email: Some("nobody@example.com".into()),
            password: Some(TEST_PASSWORD.into()),
        })
        .await;
    assert!(matches!(unknown, Err(ApiError::EmailNotRegistered)));

    let wrong = usecase
        .execute(LoginInput {
            email: Some("ada@example.com".into()),
            password: Some("not-it".into()),
        })
        .await;
    assert!(matches!(wrong, Err(ApiError::InvalidCredentials)));
}

// ── ForgotPasswordUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_reset_password_when_answer_matches() {
    let user = test_user("ada@example.com");
    let repo = MockUserRepo::new(vec![user.clone()]);
    let usecase = ForgotPasswordUseCase { repo: repo.clone() };

    usecase
        .execute(ForgotPasswordInput {
            email: Some("ada@example.com".into()),
            answer: Some("blue".into()),
            new_password: Some("brand-new".into()),
        })
        .await
        .unwrap();

    let stored = repo.get(user.id).unwrap();
    assert!(verify_password("brand-new", &stored.password).unwrap());
    assert!(!verify_password(TEST_PASSWORD, &stored.password).unwrap());
}

#[tokio::test]
async fn should_reject_reset_with_wrong_answer() {
    let usecase = ForgotPasswordUseCase {
        repo: MockUserRepo::new(vec![test_user("ada@example.com")]),
    };
    let result = usecase
        .execute(ForgotPasswordInput {
            email: Some("ada@example.com".into()),
            answer: Some("red".into()),
            new_password: Some("brand-new".into()),
        })
        .await;
    assert!(matches!(result, Err(ApiError::WrongEmailOrAnswer)));
}

// ── UpdateProfileUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_short_password_on_profile_update() {
    let user = test_user("ada@example.com");
    let usecase = UpdateProfileUseCase {
        repo: MockUserRepo::new(vec![user.clone()]),
    };
    let err = usecase
        .execute(
            user.id,
            UpdateProfileInput {
                password: Some("12345".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Password must be at least 6 characters long");
}

#[tokio::test]
async fn should_keep_unspecified_profile_fields() {
    let user = test_user("ada@example.com");
    let usecase = UpdateProfileUseCase {
        repo: MockUserRepo::new(vec![user.clone()]),
    };
    let updated = usecase
        .execute(
            user.id,
            UpdateProfileInput {
                address: Some("9 New Lane".into()),
                name: Some("".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.address, "9 New Lane");
    assert_eq!(updated.name, user.name);
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.password, user.password);
}

// ── AuthorizeAdminUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_authorize_admin_only() {
    let admin = test_admin();
    let customer = test_user("ada@example.com");
    let usecase = AuthorizeAdminUseCase {
        repo: MockUserRepo::new(vec![admin.clone(), customer.clone()]),
    };

    assert_eq!(usecase.execute(admin.id).await.unwrap().id, admin.id);
    assert!(matches!(
        usecase.execute(customer.id).await,
        Err(ApiError::NotAdmin)
    ));
    assert!(matches!(
        usecase.execute(Uuid::now_v7()).await,
        Err(ApiError::Internal(_))
    ));
}

// ── register → login → orders ───────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_orders_of_the_signed_in_buyer() {
    let users = MockUserRepo::empty();
    let register = RegisterUseCase {
        repo: users.clone(),
    };
    let me = register
        .execute(register_input("me@example.com"))
        .await
        .unwrap();
    let other = register
        .execute(register_input("other@example.com"))
        .await
        .unwrap();

    let login = login_usecase(users.clone());
    let output = login
        .execute(LoginInput {
            email: Some("me@example.com".into()),
            password: Some("correct-horse".into()),
        })
        .await
        .unwrap();
    let signed_in = validate_token(&output.token, TEST_JWT_SECRET).unwrap().user_id;
    assert_eq!(signed_in, me.id);

    let orders = MockOrderRepo::new(
        vec![me.clone(), other.clone()],
        vec![
            test_order(me.id, vec![Uuid::now_v7()]),
            test_order(other.id, vec![Uuid::now_v7()]),
            test_order(me.id, vec![Uuid::now_v7(), Uuid::now_v7()]),
        ],
    );
    let usecase = ListBuyerOrdersUseCase { repo: orders };
    let mine = usecase.execute(signed_in).await.unwrap();

    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|view| view.order.buyer_id == me.id));
    assert!(mine.iter().all(|view| view.buyer_name == "Grace"));
}
