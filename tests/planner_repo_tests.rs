// PlannerRepo tests: schema init, week fill against SQLite, week updates, entity CRUD

mod common;

use chrono::{Datelike, Utc};
use common::{temp_repo, ymd};
use practicum_planner::calendar::{
    FillPolicy, WeekStore, fill_next_missing_weeks, mondays_of_year,
};
use practicum_planner::backfill::run_backfill;
use practicum_planner::models::*;
use std::collections::HashSet;

fn school_input(name: &str) -> OrganizationInput {
    OrganizationInput {
        name: name.into(),
        contact_person: None,
        phone: None,
        email: None,
    }
}

fn student_input(name: &str, school_id: Option<i64>) -> StudentInput {
    StudentInput {
        name: name.into(),
        school_id,
        company_id: None,
        phone: None,
        email: None,
    }
}

fn booking(student_id: i64) -> UpdateWeek {
    UpdateWeek {
        status: WeekStatus::Booked,
        student_id: Some(student_id),
        notes: Some("first block".into()),
    }
}

#[tokio::test]
async fn init_is_idempotent() {
    let (_dir, repo) = temp_repo().await;
    repo.init().await.unwrap();
    assert!(repo.week_start_dates().await.unwrap().is_empty());
    assert!(repo.available_years().await.unwrap().is_empty());
}

#[tokio::test]
async fn fill_writes_free_weeks_for_one_year() {
    let (_dir, repo) = temp_repo().await;
    let summary = fill_next_missing_weeks(&repo, 2026, FillPolicy::default(), Utc::now())
        .await
        .unwrap();
    assert_eq!(summary.year, Some(2026));
    assert_eq!(summary.created, 52);

    let weeks = repo.list_weeks_for_year(2026).await.unwrap();
    assert_eq!(weeks.len(), 52);
    assert_eq!(weeks[0].week_start_date, ymd(2026, 1, 5));
    assert_eq!(weeks[51].week_start_date, ymd(2026, 12, 28));
    for w in &weeks {
        assert_eq!(w.status, WeekStatus::Free);
        assert_eq!(w.student_id, None);
        assert_eq!(w.notes, None);
        assert_eq!(w.student_name, None);
    }
    assert!(repo.list_weeks_for_year(2027).await.unwrap().is_empty());
    assert_eq!(repo.available_years().await.unwrap(), vec![2026]);
}

#[tokio::test]
async fn startup_backfill_fills_current_year_only() {
    let (_dir, repo) = temp_repo().await;
    let year = chrono::Local::now().year();

    let summary = run_backfill(&repo, FillPolicy::default()).await.unwrap();
    assert_eq!(summary.year, Some(year));
    assert_eq!(summary.created, mondays_of_year(year).count() as u64);
    assert_eq!(repo.available_years().await.unwrap(), vec![year]);

    let again = run_backfill(&repo, FillPolicy::default()).await.unwrap();
    assert_eq!(again.year, Some(year + 1));
}

#[tokio::test]
async fn repeated_fills_walk_the_horizon_then_stop() {
    let (_dir, repo) = temp_repo().await;
    let policy = FillPolicy {
        horizon_years: 3,
        batch_size: 5,
    };
    let mut years = Vec::new();
    loop {
        let summary = fill_next_missing_weeks(&repo, 2026, policy, Utc::now())
            .await
            .unwrap();
        match summary.year {
            Some(year) => {
                assert_eq!(summary.created as usize, mondays_of_year(year).count());
                years.push(year);
            }
            None => {
                assert_eq!(summary.created, 0);
                break;
            }
        }
    }
    assert_eq!(years, vec![2026, 2027, 2028]);
    assert_eq!(repo.available_years().await.unwrap(), vec![2026, 2027, 2028]);
}

#[tokio::test]
async fn insert_skips_existing_weeks() {
    let (_dir, repo) = temp_repo().await;
    let now = Utc::now();
    let first = repo
        .insert_free_weeks(&[ymd(2026, 1, 5), ymd(2026, 1, 12)], now)
        .await
        .unwrap();
    assert_eq!(first, 2);

    let second = repo
        .insert_free_weeks(&[ymd(2026, 1, 12), ymd(2026, 1, 19)], now)
        .await
        .unwrap();
    assert_eq!(second, 1);
    assert_eq!(repo.week_start_dates().await.unwrap().len(), 3);
    assert_eq!(repo.insert_free_weeks(&[], now).await.unwrap(), 0);
}

#[tokio::test]
async fn concurrent_fills_never_duplicate_weeks() {
    let (_dir, repo) = temp_repo().await;
    let policy = FillPolicy {
        horizon_years: 1,
        batch_size: 5,
    };
    let (a, b) = tokio::join!(
        fill_next_missing_weeks(&repo, 2026, policy, Utc::now()),
        fill_next_missing_weeks(&repo, 2026, policy, Utc::now()),
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.created + b.created, 52);

    let dates = repo.week_start_dates().await.unwrap();
    let unique: HashSet<_> = dates.iter().collect();
    assert_eq!(dates.len(), 52);
    assert_eq!(unique.len(), 52);
}

#[tokio::test]
async fn update_week_books_and_releases() {
    let (_dir, repo) = temp_repo().await;
    fill_next_missing_weeks(&repo, 2026, FillPolicy::default(), Utc::now())
        .await
        .unwrap();
    let school = repo
        .create_organization(OrganizationKind::School, &school_input("Pflegeschule Nord"), Utc::now())
        .await
        .unwrap();
    let student = repo
        .create_student(&student_input("Anna Schmidt", Some(school.id)), Utc::now())
        .await
        .unwrap();

    let week_id = repo.list_weeks_for_year(2026).await.unwrap()[3].id;
    let updated = repo
        .update_week(week_id, &booking(student.id), Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, WeekStatus::Booked);
    assert_eq!(updated.student_id, Some(student.id));

    let listing = &repo.list_weeks_for_year(2026).await.unwrap()[3];
    assert_eq!(listing.student_name.as_deref(), Some("Anna Schmidt"));
    assert_eq!(listing.school_name.as_deref(), Some("Pflegeschule Nord"));
    assert_eq!(listing.notes.as_deref(), Some("first block"));

    assert!(repo
        .update_week(999_999, &booking(student.id), Utc::now())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn deleting_student_frees_booked_weeks() {
    let (_dir, repo) = temp_repo().await;
    fill_next_missing_weeks(&repo, 2026, FillPolicy::default(), Utc::now())
        .await
        .unwrap();
    let student = repo
        .create_student(&student_input("Lisa Müller", None), Utc::now())
        .await
        .unwrap();
    let weeks = repo.list_weeks_for_year(2026).await.unwrap();
    repo.update_week(weeks[0].id, &booking(student.id), Utc::now())
        .await
        .unwrap();
    let vacation = UpdateWeek {
        status: WeekStatus::Vacation,
        student_id: Some(student.id),
        notes: None,
    };
    repo.update_week(weeks[1].id, &vacation, Utc::now())
        .await
        .unwrap();

    let deleted = repo.delete_student(student.id, Utc::now()).await.unwrap();
    assert_eq!(deleted.map(|s| s.id), Some(student.id));
    assert!(repo.get_student(student.id).await.unwrap().is_none());

    let booked = repo.get_week(weeks[0].id).await.unwrap().unwrap();
    assert_eq!(booked.status, WeekStatus::Free);
    assert_eq!(booked.student_id, None);
    assert_eq!(booked.notes.as_deref(), Some("first block"));

    let vac = repo.get_week(weeks[1].id).await.unwrap().unwrap();
    assert_eq!(vac.status, WeekStatus::Vacation);
    assert_eq!(vac.student_id, None);

    assert!(repo.delete_student(student.id, Utc::now()).await.unwrap().is_none());
}

#[tokio::test]
async fn organizations_crud_and_linked_students() {
    let (_dir, repo) = temp_repo().await;
    let kind = OrganizationKind::Company;
    let company = repo
        .create_organization(kind, &school_input("Kinderarztpraxis Schwabing"), Utc::now())
        .await
        .unwrap();
    assert!(repo.organization_exists(kind, company.id).await.unwrap());
    assert!(!repo
        .organization_exists(OrganizationKind::School, company.id)
        .await
        .unwrap());

    let mut input = school_input("Kinderarztpraxis Schwabing");
    input.email = Some("praxis@example.org".into());
    let updated = repo
        .update_organization(kind, company.id, &input, Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.email.as_deref(), Some("praxis@example.org"));

    let mut student = student_input("Sarah Weber", None);
    student.company_id = Some(company.id);
    repo.create_student(&student, Utc::now()).await.unwrap();
    assert_eq!(repo.count_linked_students(kind, company.id).await.unwrap(), 1);
    assert_eq!(repo.list_organizations(kind).await.unwrap().len(), 1);
    assert!(repo.list_organizations(OrganizationKind::School).await.unwrap().is_empty());
}

#[tokio::test]
async fn timestamps_round_trip_as_seconds() {
    let (_dir, repo) = temp_repo().await;
    let now = Utc::now();
    let school = repo
        .create_organization(OrganizationKind::School, &school_input("KPS"), now)
        .await
        .unwrap();
    assert_eq!(school.created_at.timestamp(), now.timestamp());
    assert_eq!(school.created_at, school.updated_at);
    assert_eq!(school.created_at.year(), now.year());
}
