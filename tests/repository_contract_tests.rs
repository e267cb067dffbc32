mod common;

use std::sync::Arc;

use chrono::Utc;

use common::{quiz, InMemoryCredentialRepository, InMemorySubmissionRepository};
use lms_server::{
    auth::{IdentityProvider, JwtIdentityProvider, JwtService},
    config::Config,
    errors::AppError,
    models::domain::{Evaluation, Reopen, Submission, SubmissionStatus, UserRole},
    repositories::SubmissionRepository,
};

fn evaluation(score: f64) -> Evaluation {
    Evaluation {
        answers: Vec::new(),
        score,
        total_marks: 10.0,
        percentage: score * 10.0,
        passed: score >= 6.0,
        submitted_at: Utc::now(),
        time_taken: 5,
        tab_switch_count: 0,
        fullscreen_exits: 0,
        suspicious_activity: Vec::new(),
    }
}

fn reopen_by(teacher_id: &str, extend_minutes: i32) -> Reopen {
    Reopen {
        resumed_by: teacher_id.to_string(),
        resumed_at: Utc::now(),
        reason: None,
        extend_minutes,
    }
}

#[tokio::test]
async fn submission_repository_status_transitions_and_guards() {
    let repo = InMemorySubmissionRepository::default();
    let quiz = quiz("quiz-1");

    let first = repo
        .create(Submission::start(&quiz, "student-1", 1, Vec::new()))
        .await
        .expect("create first attempt");

    let second_open = repo
        .create(Submission::start(&quiz, "student-1", 2, Vec::new()))
        .await;
    assert!(matches!(second_open, Err(AppError::AlreadyExists(_))));

    repo.create(Submission::start(&quiz, "student-2", 1, Vec::new()))
        .await
        .expect("other students are independent");

    let open = repo
        .find_in_progress("student-1", "quiz-1")
        .await
        .expect("query should work");
    assert_eq!(open.map(|s| s.id), Some(first.id.clone()));

    let evaluated = repo
        .record_evaluation(&first.id, evaluation(8.0))
        .await
        .expect("evaluation should work")
        .expect("open attempt should transition");
    assert_eq!(evaluated.status, SubmissionStatus::Evaluated);
    assert_eq!(evaluated.score, 8.0);

    let again = repo
        .record_evaluation(&first.id, evaluation(0.0))
        .await
        .expect("evaluation query should work");
    assert!(again.is_none());
    assert_eq!(repo.get(&first.id).await.map(|s| s.score), Some(8.0));

    let count = repo
        .count_completed("student-1", "quiz-1")
        .await
        .expect("count should work");
    assert_eq!(count, 1);

    let reopened = repo
        .reopen(&first.id, reopen_by("teacher-1", 10))
        .await
        .expect("reopen should work")
        .expect("completed attempt should reopen");
    assert_eq!(reopened.status, SubmissionStatus::InProgress);
    assert_eq!(reopened.time_limit, 40);

    let reopen_open = repo
        .reopen(&first.id, reopen_by("teacher-1", 0))
        .await
        .expect("reopen query should work");
    assert!(reopen_open.is_none());

    let missing = repo
        .reopen("missing", reopen_by("teacher-1", 0))
        .await
        .expect("reopen query should work");
    assert!(missing.is_none());
}

#[tokio::test]
async fn submission_repository_claims_each_attempt_number_once() {
    let repo = InMemorySubmissionRepository::default();
    let quiz = quiz("quiz-1");

    let first = repo
        .create(Submission::start(&quiz, "student-1", 1, Vec::new()))
        .await
        .expect("create first attempt");
    repo.record_evaluation(&first.id, evaluation(4.0))
        .await
        .expect("evaluate first attempt");

    // A start that counted before the evaluation landed reuses number 1.
    let stale = repo
        .create(Submission::start(&quiz, "student-1", 1, Vec::new()))
        .await;
    assert!(matches!(stale, Err(AppError::AlreadyExists(_))));
    assert_eq!(repo.count().await, 1);

    let second = repo
        .create(Submission::start(&quiz, "student-1", 2, Vec::new()))
        .await
        .expect("next number is free");
    assert_eq!(second.attempt_number, 2);
}

#[tokio::test]
async fn submission_repository_lists_completed_newest_first() {
    let repo = InMemorySubmissionRepository::default();
    let quiz = quiz("quiz-1");

    for student in ["student-1", "student-2"] {
        let attempt = repo
            .create(Submission::start(&quiz, student, 1, Vec::new()))
            .await
            .expect("create attempt");
        repo.record_evaluation(&attempt.id, evaluation(5.0))
            .await
            .expect("evaluate attempt");
    }
    repo.create(Submission::start(&quiz, "student-3", 1, Vec::new()))
        .await
        .expect("open attempt");

    let all = repo
        .list_completed("quiz-1", None)
        .await
        .expect("list should work");
    assert_eq!(all.len(), 2);
    assert!(all[0].submitted_at >= all[1].submitted_at);

    let own = repo
        .list_completed("quiz-1", Some("student-2".to_string()))
        .await
        .expect("filtered list should work");
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].student_id, "student-2");
}

#[tokio::test]
async fn identity_provider_accounts_and_sign_in() {
    let config = Config::test_config();
    let credentials = Arc::new(InMemoryCredentialRepository::default());
    let identity = JwtIdentityProvider::new(
        credentials,
        JwtService::new(&config.jwt_secret, config.jwt_expiration_hours),
    );

    let uid = identity
        .create_account("Ada@Example.com", "secret123", UserRole::Teacher)
        .await
        .expect("create account");

    let duplicate = identity
        .create_account("ada@example.com", "other-pass", UserRole::Student)
        .await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let session = identity
        .sign_in("ada@example.com", "secret123")
        .await
        .expect("sign in should work");
    assert_eq!(session.uid, uid);

    let principal = identity.verify(&session.token).expect("token should verify");
    assert_eq!(principal.user_id, uid);
    assert_eq!(principal.role, UserRole::Teacher);

    let wrong = identity.sign_in("ada@example.com", "wrong-pass").await;
    assert!(matches!(wrong, Err(AppError::Unauthorized(_))));

    identity
        .set_role(&uid, UserRole::Admin)
        .await
        .expect("set role should work");
    let session = identity
        .sign_in("ada@example.com", "secret123")
        .await
        .expect("sign in after role change");
    let principal = identity.verify(&session.token).expect("token should verify");
    assert_eq!(principal.role, UserRole::Admin);

    identity.delete_account(&uid).await.expect("delete account");
    let gone = identity.sign_in("ada@example.com", "secret123").await;
    assert!(matches!(gone, Err(AppError::Unauthorized(_))));
}
