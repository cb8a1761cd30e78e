use actix_web::http::StatusCode;

use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

#[test]
fn validation_maps_to_400() {
    let err: AppError = DomainError::validation("username too short").into();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn username_conflict_maps_to_409() {
    let err: AppError =
        DomainError::conflict(ConflictKind::UniqueUsername, "Username already exists").into();
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert!(matches!(
        err,
        AppError::Conflict {
            code: crate::errors::ErrorCode::UsernameTaken,
            ..
        }
    ));
}

#[test]
fn completed_session_conflict_maps_to_409() {
    let err: AppError =
        DomainError::conflict(ConflictKind::SessionCompleted, "Session already completed").into();
    assert!(matches!(
        err,
        AppError::Conflict {
            code: crate::errors::ErrorCode::SessionAlreadyCompleted,
            ..
        }
    ));
}

#[test]
fn not_found_kinds_map_to_404_with_specific_codes() {
    let user: AppError = DomainError::not_found(NotFoundKind::User, "User 7 not found").into();
    assert_eq!(user.status(), StatusCode::NOT_FOUND);
    assert!(matches!(
        user,
        AppError::NotFound {
            code: crate::errors::ErrorCode::UserNotFound,
            ..
        }
    ));

    let session: AppError =
        DomainError::not_found(NotFoundKind::Session, "Game session not found").into();
    assert!(matches!(
        session,
        AppError::NotFound {
            code: crate::errors::ErrorCode::SessionNotFound,
            ..
        }
    ));
}

#[test]
fn infra_failures_map_to_500() {
    let err: AppError =
        DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable").into();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(matches!(err, AppError::DbUnavailable { .. }));

    let other: AppError =
        DomainError::infra(InfraErrorKind::Other("weird".into()), "Database error").into();
    assert_eq!(other.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(matches!(other, AppError::Db { .. }));
}
